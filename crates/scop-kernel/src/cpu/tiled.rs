use crate::element::Element;
use crate::error::{KernelError, Result};
use crate::kernel::{debug_check_lengths, Kernel};

/// Default edge length of a tile.
pub const DEFAULT_TILE: usize = 32;

/// Rectangular tiling of all three loops.
///
/// C is cleared once, then each `tile_m x tile_n` block of C accumulates the
/// partial products of one `tile_k` slice at a time. Edge tiles are clipped,
/// so any matrix size is handled.
#[derive(Debug, Clone)]
pub struct TiledKernel {
    tile_m: usize,
    tile_n: usize,
    tile_k: usize,
}

impl TiledKernel {
    /// Square tiles of edge `tile` in every dimension.
    pub fn new(tile: usize) -> Result<Self> {
        Self::with_tiles(tile, tile, tile)
    }

    pub fn with_tiles(tile_m: usize, tile_n: usize, tile_k: usize) -> Result<Self> {
        for t in [tile_m, tile_n, tile_k] {
            if t == 0 {
                return Err(KernelError::InvalidTile(t));
            }
        }
        Ok(TiledKernel {
            tile_m,
            tile_n,
            tile_k,
        })
    }

    pub fn tiles(&self) -> (usize, usize, usize) {
        (self.tile_m, self.tile_n, self.tile_k)
    }
}

impl Default for TiledKernel {
    fn default() -> Self {
        TiledKernel {
            tile_m: DEFAULT_TILE,
            tile_n: DEFAULT_TILE,
            tile_k: DEFAULT_TILE,
        }
    }
}

impl<T: Element> Kernel<T> for TiledKernel {
    fn name(&self) -> &str {
        "tiled"
    }

    fn multiply_into(&self, a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
        debug_check_lengths(a, b, c, m, k, n);
        c.fill(T::ZERO);

        for ii in (0..m).step_by(self.tile_m) {
            let i_end = (ii + self.tile_m).min(m);
            for jj in (0..n).step_by(self.tile_n) {
                let j_end = (jj + self.tile_n).min(n);
                for pp in (0..k).step_by(self.tile_k) {
                    let p_end = (pp + self.tile_k).min(k);

                    for i in ii..i_end {
                        for j in jj..j_end {
                            let mut acc = c[i * n + j];
                            for p in pp..p_end {
                                acc = acc.mul_add(a[i * k + p], b[p * n + j]);
                            }
                            c[i * n + j] = acc;
                        }
                    }
                }
            }
        }
    }
}
