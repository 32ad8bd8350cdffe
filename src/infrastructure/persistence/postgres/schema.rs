//! # Station Schema
//!
//! DDL applied at startup. Idempotent.

/// Creates the `stations` table and its coordinate index.
///
/// Coordinates are nullable: rows imported from elsewhere may lack them,
/// and such rows are skipped at ranking time rather than rejected here.
pub const SCHEMA: &str = r#"

CREATE TABLE IF NOT EXISTS stations (
    seq BIGSERIAL PRIMARY KEY,
    id UUID NOT NULL UNIQUE,
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    longitude DOUBLE PRECISION,
    latitude DOUBLE PRECISION,
    gazoil_price NUMERIC NOT NULL CHECK (gazoil_price >= 0),
    diesel_price NUMERIC NOT NULL CHECK (diesel_price >= 0)
);

CREATE INDEX IF NOT EXISTS stations_coordinates_idx ON stations (latitude, longitude);

"#;
