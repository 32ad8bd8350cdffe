//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`ProximityRankingService`]: Nearby-station search and registration
//! - [`RankingStrategy`]: Strategies for ordering nearby stations

pub mod proximity_ranking;
pub mod ranking_strategy;

pub use proximity_ranking::{ProximityQuery, ProximityRankingService, RankingConfig};
pub use ranking_strategy::{
    CheapestFuelStrategy, NearestFirstStrategy, RankedStation, RankingOrder, RankingStrategy,
};
