#![allow(dead_code)]

pub mod mock_engine;
pub mod provider;
