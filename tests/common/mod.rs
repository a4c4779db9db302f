#![allow(dead_code)]

use std::io::Write;

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tickersim::domain::asset::default_catalog;
use tickersim::domain::path::generate_path;
use tickersim::domain::position::reference_book;
use tickersim::domain::session::{PathRequest, Session, SessionConfig};

/// RngCore returning the same raw word forever. `half()` makes every
/// `random::<f64>()` draw exactly 0.5.
pub struct ConstRng(u64);

impl ConstRng {
    pub fn half() -> Self {
        ConstRng(1u64 << 63)
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = self.0.to_le_bytes();
        for chunk in dest.chunks_mut(8) {
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn start_session(seed: u64) -> Session {
    Session::start(
        &mut seeded(seed),
        default_catalog(),
        reference_book(),
        &SessionConfig::default(),
    )
    .unwrap()
}

/// Run the generator for an outstanding request with its own seeded RNG.
pub fn fulfil(request: &PathRequest, seed: u64) -> Vec<tickersim::domain::path::PricePoint> {
    generate_path(
        &mut seeded(seed),
        request.base_price,
        request.volatility,
        request.point_count,
    )
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
