use uuid::Uuid;

/// Chooses one index out of a list.
pub trait IndexPicker: Send + Sync {
    /// Returns an index in `[0, len)`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform picker fed by the random bits of a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformPicker;

/// Low 62 bits of the second half of a v4 UUID are random; the two bits
/// above them hold the variant.
const RANDOM_LOW_BITS: u64 = (1 << 62) - 1;

impl IndexPicker for UniformPicker {
    fn pick(&self, len: usize) -> usize {
        let (_, low) = Uuid::new_v4().as_u64_pair();
        ((low & RANDOM_LOW_BITS) % len as u64) as usize
    }
}
