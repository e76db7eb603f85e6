use strum::{Display, EnumIter, EnumString};

/// Discriminator sent by the form as `userType`. Each variant owns exactly one
/// target spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum UserType {
    Buy,
    Sell,
    Rent,
}
