pub mod inventories;
pub mod system;
