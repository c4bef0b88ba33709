mod helpers;
mod orders;
mod products;
mod refunds;
