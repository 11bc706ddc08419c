/// Returns the largest element of `sorted_desc` that is `<= needle`.
///
/// `sorted_desc` must be sorted from largest to smallest. Returns `None`
/// when the slice is empty or every element is greater than `needle`.
pub fn floor<'a, T: Ord>(sorted_desc: &'a [T], needle: &T) -> Option<&'a T> {
    sorted_desc.iter().find(|candidate| *candidate <= needle)
}
