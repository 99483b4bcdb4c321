pub mod bracket;
pub mod champion;
pub mod theme;
