pub mod jwt;
pub mod order_number;
pub mod validation;

pub use jwt::*;
pub use order_number::{ORDER_NUMBER_MAX_LEN, generate_order_number};
pub use validation::*;
