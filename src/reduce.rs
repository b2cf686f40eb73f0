// Numerology Reducer
// Digit-sum reduction with master number exceptions

/// Split a number into its decimal digits: 1234 -> [1, 2, 3, 4]
pub fn split_number(n: u64) -> Vec<u32> {
    if n == 0 {
        return vec![0];
    }
    let mut digits = Vec::new();
    let mut rest = n;
    while rest > 0 {
        digits.push((rest % 10) as u32);
        rest /= 10;
    }
    digits.reverse();
    digits
}

/// Sum of the decimal digits of `n`
#[inline]
pub fn digit_sum(n: u32) -> u32 {
    split_number(n as u64).iter().sum()
}

/// Reduce `n` by repeated digit sums
///
/// Returns every value visited, starting with `n`. Reduction stops at a single
/// digit or at a member of `master_numbers`, so the last element is always one
/// of the two.
///
/// # Example
/// ```
/// # use numerology::reduce::reduce;
/// assert_eq!(reduce(83, &[]), vec![83, 11, 2]);
/// assert_eq!(reduce(83, &[11, 22, 33]), vec![83, 11]);
/// ```
pub fn reduce(n: u32, master_numbers: &[u32]) -> Vec<u32> {
    let mut steps = vec![n];
    let mut current = n;
    while current >= 10 && !master_numbers.contains(&current) {
        current = digit_sum(current);
        steps.push(current);
    }
    steps
}

/// Final value of [`reduce`]
#[inline]
pub fn reduce_value(n: u32, master_numbers: &[u32]) -> u32 {
    let mut current = n;
    while current >= 10 && !master_numbers.contains(&current) {
        current = digit_sum(current);
    }
    current
}
