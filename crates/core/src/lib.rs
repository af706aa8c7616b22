pub mod checkout;
pub mod config;
pub mod domain;

pub use checkout::{price_purchase, CheckoutError, PurchaseTicket};
pub use domain::product::{Product, ProductId};
pub use domain::sale::{Sale, SaleId};
