use crate::cpu::tiled::DEFAULT_TILE;
use crate::cpu::KernelKind;
use crate::error::{KernelError, Result};
use crate::shape::Shape;
use crate::workspace::{InitPolicy, DEFAULT_DIM};

/// Parameters for one multiplication run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatmulConfig {
    /// Edge length of A, B and C.
    pub dim: usize,
    /// Loop-nest variant to run.
    pub kernel: KernelKind,
    /// How A and B are populated.
    pub init: InitPolicy,
    /// Tile edge for `KernelKind::Tiled`.
    pub tile: usize,
    /// Worker count for `KernelKind::Parallel`; `None` uses rayon's global pool.
    pub threads: Option<usize>,
    /// Recompute C from the definition after the run.
    pub verify: bool,
}

impl Default for MatmulConfig {
    fn default() -> Self {
        Self {
            dim: DEFAULT_DIM,
            kernel: KernelKind::Reference,
            init: InitPolicy::Zero,
            tile: DEFAULT_TILE,
            threads: None,
            verify: false,
        }
    }
}

impl MatmulConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 || Shape::square(self.dim).checked_numel().is_none() {
            return Err(KernelError::InvalidDimension(self.dim));
        }
        if self.tile == 0 {
            return Err(KernelError::InvalidTile(self.tile));
        }
        if self.threads == Some(0) {
            return Err(KernelError::InvalidThreads(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_program() {
        let c = MatmulConfig::default();
        assert_eq!(c.dim, 1024);
        assert_eq!(c.kernel, KernelKind::Reference);
        assert_eq!(c.init, InitPolicy::Zero);
        assert!(!c.verify);
        c.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let bad_dim = MatmulConfig {
            dim: 0,
            ..Default::default()
        };
        let bad_tile = MatmulConfig {
            tile: 0,
            ..Default::default()
        };
        let bad_threads = MatmulConfig {
            threads: Some(0),
            ..Default::default()
        };
        assert!(matches!(bad_dim.validate(), Err(KernelError::InvalidDimension(0))));
        assert!(matches!(bad_tile.validate(), Err(KernelError::InvalidTile(0))));
        assert!(matches!(bad_threads.validate(), Err(KernelError::InvalidThreads(0))));
    }

    #[test]
    fn test_validate_rejects_overflowing_dim() {
        let dim = 1usize << (usize::BITS / 2);
        let config = MatmulConfig {
            dim,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(KernelError::InvalidDimension(d)) if d == dim));
    }
}
