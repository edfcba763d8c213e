//! # cart-api
//!
//! HTTP API layer for the session cart.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the catalog, session carts and checkout
//! - In-memory session cart store
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/products` | List products |
//! | GET | `/api/v1/categories` | List categories |
//! | POST | `/api/v1/carts` | Start a session cart |
//! | GET | `/api/v1/carts/{cart_id}` | Cart contents |
//! | DELETE | `/api/v1/carts/{cart_id}` | End the session |
//! | GET | `/api/v1/carts/{cart_id}/summary` | Cart widget |
//! | POST | `/api/v1/carts/{cart_id}/add` | Add to cart |
//! | POST | `/api/v1/carts/{cart_id}/remove` | Remove from cart |
//! | GET | `/api/v1/checkout` | Blank shipping form |
//! | POST | `/api/v1/carts/{cart_id}/checkout` | Submit the order |

pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;

pub use routes::create_router;
pub use session::CartStore;
pub use state::{AppConfig, AppState};
