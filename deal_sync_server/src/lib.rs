//! # Deal sync server
//! This crate hosts the HTTP side of the deal sync. It is responsible for:
//! Listening for incoming webhook requests from Shopify.
//! Giving every request a correlation id and parsing its JSON body.
//! Handing the payload to the [`deal_sync_engine::DealSyncApi`], which reconciles the Bitrix24 deal pipeline.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/webhook/shopify/order/crt`: `orders/create` webhooks.
//! * `/api/webhook/shopify/order/upd`: `orders/updated` webhooks.
//! * `/api/webhook/shopify/product/upd`: `products/update` webhooks.
//! * `/api/webhook/shopify/refund/crt`: `refunds/create` webhooks.
//!
//! Webhook routes only accept `POST`. Anything else gets a 405.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod routes;
pub mod server;
pub mod webhook_routes;

#[cfg(test)]
mod endpoint_tests;
