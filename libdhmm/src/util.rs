use std::ops::AddAssign;

#[cfg(test)]
#[ctor::ctor]
fn init_backtrace() {
    color_backtrace::install();
}

pub trait Float: PartialOrd + Copy + AddAssign {
    fn from_usize(n: usize) -> Self;
}

impl Float for f32 {
    fn from_usize(n: usize) -> Self {
        n as f32
    }
}

impl Float for f64 {
    fn from_usize(n: usize) -> Self {
        n as f64
    }
}

pub trait VecMath<T>
where
    T: Float,
{
    fn sum_left(&self) -> T;
    fn argmax(&self) -> Option<usize>;
}

impl<T> VecMath<T> for [T]
where
    T: Float,
{
    /// Sum the elements in order, starting from zero.
    fn sum_left(&self) -> T {
        let mut sum = T::from_usize(0);
        self.iter().for_each(|&item| sum += item);
        sum
    }

    /// The index of the largest element; ties resolve to the lowest index.
    fn argmax(&self) -> Option<usize> {
        let mut max = *self.first()?;
        let mut argmax: usize = 0;

        for (idx, &item) in self.iter().enumerate().skip(1) {
            if item > max {
                max = item;
                argmax = idx;
            }
        }

        Some(argmax)
    }
}

/// Generate the default state labels: "A", "B", ... "Z", "AA", "AB", ...
pub fn lettered_labels(count: usize) -> Vec<String> {
    (0..count)
        .map(|mut idx| {
            let mut label: Vec<u8> = vec![];
            loop {
                label.push(b'A' + (idx % 26) as u8);
                if idx < 26 {
                    break;
                }
                idx = idx / 26 - 1;
            }
            label.iter().rev().map(|&b| b as char).collect()
        })
        .collect()
}

/// Generate the default emission labels: "0", "1", ...
pub fn numbered_labels(count: usize) -> Vec<String> {
    (0..count).map(|idx| idx.to_string()).collect()
}

#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        $crate::assert_close!($left, $right, 1e-6)
    };
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        ::std::assert!(
            (left - right).abs() <= $tolerance,
            "{} is not within {} of {}",
            left,
            $tolerance,
            right
        );
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn test_argmax_prefers_lowest_index() {
        let values = vec![0.1, 0.4, 0.4, 0.1];
        assert!(values.argmax() == Some(1));

        let empty: Vec<f64> = vec![];
        assert!(empty.argmax() == None);
    }

    #[test]
    fn test_sum_left() {
        let values = vec![0.6, 0.3, 0.1];
        assert!(values.sum_left() == 0.6 + 0.3 + 0.1);
        assert!(values.sum_left() != 1.0);
    }

    #[test]
    fn test_lettered_labels() {
        assert!(lettered_labels(3) == vec!["A", "B", "C"]);

        let many = lettered_labels(28);
        assert!(many[25] == "Z");
        assert!(many[26] == "AA");
        assert!(many[27] == "AB");
    }

    #[test]
    fn test_numbered_labels() {
        assert!(numbered_labels(4) == vec!["0", "1", "2", "3"]);
    }
}
