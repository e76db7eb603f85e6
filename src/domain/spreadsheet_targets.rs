use serde::Deserialize;

use super::user_type::UserType;

/// One spreadsheet per user type.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetTargets {
    pub buy: String,
    pub sell: String,
    pub rent: String,
}

impl SpreadsheetTargets {
    pub fn spreadsheet_id(&self, user_type: UserType) -> &str {
        match user_type {
            UserType::Buy => &self.buy,
            UserType::Sell => &self.sell,
            UserType::Rent => &self.rent,
        }
    }

    /// Identifiers must be present and distinct so every user type owns its own spreadsheet.
    pub fn validate(&self) -> Result<(), String> {
        let entries = [
            (UserType::Buy, self.buy.trim()),
            (UserType::Sell, self.sell.trim()),
            (UserType::Rent, self.rent.trim()),
        ];

        for (user_type, id) in &entries {
            if id.is_empty() {
                return Err(format!("spreadsheet id for '{}' is empty", user_type));
            }
        }

        for (index, (user_type, id)) in entries.iter().enumerate() {
            if let Some((other, _)) = entries[index + 1..]
                .iter()
                .find(|(_, candidate)| candidate == id)
            {
                return Err(format!(
                    "'{}' and '{}' share spreadsheet id {}",
                    user_type, other, id
                ));
            }
        }

        Ok(())
    }
}
