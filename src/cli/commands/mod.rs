pub mod content;
pub mod fixture;
pub mod health;
pub mod keygen;
