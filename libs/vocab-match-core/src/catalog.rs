//! Card catalog: the source of vocabulary items for a round.

use crate::types::CardDefinition;

/// Read-only source of category-tagged vocabulary.
///
/// Implementations must return stable data for the lifetime of a session;
/// the engine deals the first entries of a category in the order returned.
pub trait CardCatalog: Send + Sync {
    /// Category names, in catalog order.
    fn categories(&self) -> Vec<String>;

    /// All cards tagged with `category`. Unknown categories yield an empty list.
    fn cards_by_category(&self, category: &str) -> Vec<CardDefinition>;
}

/// Catalog backed by an in-memory list of definitions.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    cards: Vec<CardDefinition>,
}

impl StaticCatalog {
    pub fn new(cards: Vec<CardDefinition>) -> Self {
        Self { cards }
    }

    /// The bundled Vietnamese to English starter vocabulary.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_VOCABULARY
                .iter()
                .enumerate()
                .map(|(idx, (native, target, glyph, category, pronunciation))| {
                    CardDefinition::new(
                        (idx + 1).to_string(),
                        *native,
                        *target,
                        *glyph,
                        *category,
                        *pronunciation,
                    )
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardCatalog for StaticCatalog {
    fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for card in &self.cards {
            if !categories.iter().any(|c| c == &card.category) {
                categories.push(card.category.clone());
            }
        }
        categories
    }

    fn cards_by_category(&self, category: &str) -> Vec<CardDefinition> {
        self.cards
            .iter()
            .filter(|card| card.category == category)
            .cloned()
            .collect()
    }
}

/// (native label, target label, glyph, category, pronunciation)
const BUILTIN_VOCABULARY: &[(&str, &str, &str, &str, &str)] = &[
    ("Mèo", "Cat", "🐱", "animals", "kæt"),
    ("Chó", "Dog", "🐶", "animals", "dɔg"),
    ("Chim", "Bird", "🐦", "animals", "bɜrd"),
    ("Cá", "Fish", "🐠", "animals", "fɪʃ"),
    ("Voi", "Elephant", "🐘", "animals", "ˈɛlɪfənt"),
    ("Sư tử", "Lion", "🦁", "animals", "ˈlaɪən"),
    ("Khỉ", "Monkey", "🐵", "animals", "ˈmʌŋki"),
    ("Gấu", "Bear", "🐻", "animals", "bɛr"),
    ("Táo", "Apple", "🍎", "fruits", "æpəl"),
    ("Chuối", "Banana", "🍌", "fruits", "bəˈnænə"),
    ("Cam", "Orange", "🍊", "fruits", "ˈɔrɪndʒ"),
    ("Dâu", "Strawberry", "🍓", "fruits", "ˈstrɔberi"),
    ("Nho", "Grape", "🍇", "fruits", "ɡreɪp"),
    ("Dưa hấu", "Watermelon", "🍉", "fruits", "ˈwɔtərˌmɛlən"),
    ("Chanh", "Lemon", "🍋", "fruits", "ˈlɛmən"),
    ("Xoài", "Mango", "🥭", "fruits", "ˈmæŋɡoʊ"),
    ("Xe", "Car", "🚗", "vehicles", "kɑr"),
    ("Máy bay", "Airplane", "✈️", "vehicles", "ˈɛrpleɪn"),
    ("Tàu", "Train", "🚂", "vehicles", "treɪn"),
    ("Xe buýt", "Bus", "🚌", "vehicles", "bʌs"),
    ("Xe đạp", "Bicycle", "🚲", "vehicles", "ˈbaɪsɪkəl"),
    ("Tàu thủy", "Ship", "🚢", "vehicles", "ʃɪp"),
    ("Trực thăng", "Helicopter", "🚁", "vehicles", "ˈhɛlɪˌkɑptər"),
    ("Xe cứu thương", "Ambulance", "🚑", "vehicles", "ˈæmbjələns"),
    ("Đỏ", "Red", "🔴", "colors", "rɛd"),
    ("Xanh dương", "Blue", "🔵", "colors", "blu"),
    ("Vàng", "Yellow", "🟡", "colors", "ˈjɛloʊ"),
    ("Xanh lá", "Green", "🟢", "colors", "ɡrin"),
    ("Tím", "Purple", "🟣", "colors", "ˈpɜrpəl"),
    ("Cam", "Orange", "🟠", "colors", "ˈɔrɪndʒ"),
    ("Hồng", "Pink", "🩷", "colors", "pɪŋk"),
    ("Nâu", "Brown", "🟤", "colors", "braʊn"),
];
