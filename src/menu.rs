use crate::data::MenuItem;
use once_cell::sync::Lazy;

pub static MENU_ITEMS: Lazy<Vec<MenuItem>> = Lazy::new(|| {
    vec![
        MenuItem {
            id: 1,
            name: "Classic Ortaköy Mantı",
            description: "Hand-pinched dough filled with seasoned ground beef, topped with garlic yogurt, caramelized tomato sauce, and dried mint.",
            price: "₺190",
            image: "https://images.unsplash.com/photo-1647102604812-32a2251a2386?q=80&w=800&auto=format&fit=crop",
            popular: Some(true),
        },
        MenuItem {
            id: 2,
            name: "Fried (Çıtır) Mantı",
            description: "Deep-fried crunchy dumplings served with a side of yogurt dip and spicy butter sauce.",
            price: "₺210",
            image: "https://images.unsplash.com/photo-1604908177453-7462950a6a3b?q=80&w=800&auto=format&fit=crop",
            popular: Some(true),
        },
        MenuItem {
            id: 3,
            name: "Sinop Mantı",
            description: "A regional specialty with walnuts and butter, offering a rich and nutty flavor profile.",
            price: "₺220",
            image: "https://images.unsplash.com/photo-1590412200988-a436970781fa?q=80&w=800&auto=format&fit=crop",
            popular: Some(false),
        },
        MenuItem {
            id: 4,
            name: "Vegetarian Mantı",
            description: "Delicate dumplings filled with spiced spinach, potato, and cheese blend.",
            price: "₺190",
            image: "https://images.unsplash.com/photo-1541544744-378ca6e8dc6e?q=80&w=800&auto=format&fit=crop",
            popular: Some(false),
        },
    ]
});

#[test]
fn test_menu_catalog_is_stable() {
    let first: Vec<MenuItem> = MENU_ITEMS.clone();
    let second: Vec<MenuItem> = MENU_ITEMS.clone();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);

    let mut ids = first.iter().map(|item| item.id).collect::<Vec<_>>();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    assert!(first.iter().all(|item| !item.price.is_empty()));
    assert_eq!(first.iter().filter(|item| item.is_popular()).count(), 2);
}
