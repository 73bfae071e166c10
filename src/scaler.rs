use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from destination pixels to source pixels.
pub struct ScaleLut {
    dst_w: usize,
    src_x: Vec<usize>,
    src_row: Vec<usize>, // offset of the source row in the source buffer
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            dst_w: 0,
            src_x: Vec::new(),
            src_row: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.src_x.is_empty() || self.src_row.is_empty()
    }
}

/// Nearest-neighbour lookup for stretching `src_w`x`src_h` onto `dst_w`x`dst_h`.
pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    if src_w == 0 || src_h == 0 {
        return ScaleLut::empty();
    }

    let sx = src_w as f32 / dst_w as f32;
    let sy = src_h as f32 / dst_h as f32;

    // Sample at destination pixel centres
    let src_x = (0..dst_w)
        .map(|x| (((x as f32 + 0.5) * sx) as usize).min(src_w - 1))
        .collect();
    let src_row = (0..dst_h)
        .map(|y| (((y as f32 + 0.5) * sy) as usize).min(src_h - 1) * src_w)
        .collect();

    ScaleLut {
        dst_w,
        src_x,
        src_row,
    }
}

/// Parallel nearest-neighbour stretch; rows are filled in parallel.
/// Destination rows beyond the table are left untouched.
pub fn blit_nearest_stretch(dst: &mut [u32], dw: usize, src: &[u32], lut: &ScaleLut) {
    if dw == 0 || dw != lut.dst_w {
        return;
    }
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&row) = lut.src_row.get(y) else {
            return;
        };
        for (d, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
            *d = src[row + sx];
        }
    });
}
