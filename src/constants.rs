/// Subsets smaller than this are turned into majority vote leaves.
pub const DEFAULT_MIN_SIZE_DATALIST: usize = 1;
/// Fractional digits used when reporting an error rate.
pub const PERFORMANCE_DECIMALS: u32 = 3;
