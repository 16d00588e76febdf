use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry customers can check out against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingProgram {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub program_type: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
}

impl FundingProgram {
    pub fn apply(&mut self, changes: ProgramUpdate) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(program_type) = changes.program_type {
            self.program_type = program_type;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
    }
}

/// Inbound payload for creating a program; the identifier is assigned here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub program_type: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
}

impl ProgramDraft {
    pub fn into_program(self) -> FundingProgram {
        FundingProgram {
            id: Uuid::new_v4(),
            title: self.title,
            program_type: self.program_type,
            price: self.price,
            description: self.description,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramUpdate {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

/// Equality filters for the catalog listing. The price filter is an integer,
/// matching how the listing endpoint has always parsed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramFilter {
    pub program_type: Option<String>,
    pub price: Option<i64>,
}

impl ProgramFilter {
    pub fn matches(&self, program: &FundingProgram) -> bool {
        self.program_type
            .as_deref()
            .is_none_or(|t| program.program_type == t)
            && self
                .price
                .is_none_or(|p| program.price == Decimal::from(p))
    }
}
