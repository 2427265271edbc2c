// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic and outbound clients.

pub mod events;
pub mod gemini;
pub mod http;
pub mod photo;
pub mod profile;
pub mod runs;
pub mod weather;

pub use events::EventsClient;
pub use gemini::GeminiClient;
pub use http::ClientError;
pub use photo::{Photo, PhotoError};
pub use profile::ProfileState;
pub use runs::RunRepository;
pub use weather::WeatherClient;
