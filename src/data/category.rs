//! Complaint Category Module
//! Maps the numeric "additional info" code of a review to its complaint category.

use std::fmt;

/// Fixed set of complaint categories, in code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    SkinIrritation,
    Adhesion,
    LackOfEffect,
    PriceValue,
    SmellAndFeel,
    BelowExpectation,
    Other,
}

impl Category {
    /// All categories in code order (1..=7).
    pub const ALL: [Category; 7] = [
        Category::SkinIrritation,
        Category::Adhesion,
        Category::LackOfEffect,
        Category::PriceValue,
        Category::SmellAndFeel,
        Category::BelowExpectation,
        Category::Other,
    ];

    /// Resolve a category code. Missing and out-of-range codes fall into `Other`.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Category::SkinIrritation,
            Some(2) => Category::Adhesion,
            Some(3) => Category::LackOfEffect,
            Some(4) => Category::PriceValue,
            Some(5) => Category::SmellAndFeel,
            Some(6) => Category::BelowExpectation,
            _ => Category::Other,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Category::SkinIrritation => 1,
            Category::Adhesion => 2,
            Category::LackOfEffect => 3,
            Category::PriceValue => 4,
            Category::SmellAndFeel => 5,
            Category::BelowExpectation => 6,
            Category::Other => 7,
        }
    }

    /// Display label shown on cards, legends and filters.
    pub fn label(self) -> &'static str {
        match self {
            Category::SkinIrritation => "피부 자극 및 부작용",
            Category::Adhesion => "접착력 문제",
            Category::LackOfEffect => "효과 부족",
            Category::PriceValue => "가격 대비 성능 불만",
            Category::SmellAndFeel => "파스 냄새 및 사용감",
            Category::BelowExpectation => "기대 이하의 성능",
            Category::Other => "기타",
        }
    }

    /// Position in `Category::ALL`, used for palette lookup.
    pub fn index(self) -> usize {
        (self.code() - 1) as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
