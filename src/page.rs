use crate::data::{MenuItem, RestaurantData, Review};
use maud::{html, Markup, DOCTYPE};
use std::sync::Arc;

/// Load flag for the page. Moves from `Loading` to `Ready` exactly once.
#[derive(Debug, Clone, Default)]
pub enum PageState {
    #[default]
    Loading,
    Ready(Arc<RestaurantData>),
}

impl PageState {
    pub fn data(&self) -> Option<&Arc<RestaurantData>> {
        match self {
            Self::Loading => None,
            Self::Ready(data) => Some(data),
        }
    }
}

const STAR_SLOTS: i32 = 5;

/// Filled and empty star glyphs for a review score, clamped to the slot count.
pub fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, STAR_SLOTS) as usize;
    let empty = STAR_SLOTS as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

fn layout(title: &str, refresh: bool, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if refresh {
                    meta http-equiv="refresh" content="1";
                }
                title { (title) }
            }
            body { (body) }
        }
    }
}

pub fn render_loading() -> String {
    let body = html! {
        div.loading { "Preparing the table…" }
    };
    layout("Ortaköy Mantı Evi", true, body).into_string()
}

/// Blank lines split paragraphs, single newlines become `<br>`.
fn description(text: &str) -> Markup {
    let paragraphs = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty());
    html! {
        @for paragraph in paragraphs {
            p {
                @for (i, line) in paragraph.lines().enumerate() {
                    @if i > 0 { br; }
                    (line)
                }
            }
        }
    }
}

fn menu_card(item: &MenuItem) -> Markup {
    html! {
        article.menu-item id=(format!("menu-{}", item.id)) {
            img src=(item.image) alt=(item.name) loading="lazy";
            h3 { (item.name) }
            @if item.is_popular() {
                span.badge { "Popular" }
            }
            p { (item.description) }
            span.price { (item.price) }
        }
    }
}

fn review_card(review: &Review) -> Markup {
    html! {
        blockquote.review {
            span.stars { (stars(review.rating)) }
            p { (review.text) }
            footer { (review.author) " · " (review.source) }
        }
    }
}

pub fn render_page(data: &RestaurantData, menu: &[MenuItem]) -> String {
    let body = html! {
        header.hero {
            h1 { (data.name) }
            p.rating { (format!("{:.1}", data.rating)) " / 5 · " (data.review_count) " reviews" }
        }
        section #about {
            h2 { "Our Story" }
            (description(&data.description))
        }
        section #menu {
            h2 { "Menu" }
            div.menu-grid {
                @for item in menu {
                    (menu_card(item))
                }
            }
        }
        section #contact {
            h2 { "Visit Us" }
            address { (data.address) }
            @if let Some(uri) = &data.google_maps_uri {
                a.maps-link href=(uri) target="_blank" rel="noopener" { "Open in Google Maps" }
            }
            div.reviews {
                @for review in &data.reviews {
                    (review_card(review))
                }
            }
        }
    };
    layout(&data.name, false, body).into_string()
}
