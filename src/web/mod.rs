//! HTTP lookup API.
//!
//! This module serves the resolver over HTTP using Axum. The catalog is loaded
//! once at startup and shared read-only between requests.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! ticker-resolver serve
//!
//! # Custom port and catalog
//! ticker-resolver serve --port 3000 --catalog us.json
//!
//! # Bind to all interfaces
//! ticker-resolver serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Service summary
//! - `GET /api/resolve?q=<query>&limit=<n>` - Resolve a query, with up to `n` ranked candidates
//! - `GET /api/catalog` - List all entries in the catalog
//! - `GET /api/catalog/{ticker}` - Show a single entry

pub mod server;
