pub mod add;
pub mod check;
pub mod record;
pub mod standings;
pub mod table;
