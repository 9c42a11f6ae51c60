use super::Move;

#[cfg(test)]
pub fn assert_moves<I: Iterator<Item = Move>>(generated: I, mut expected: Vec<(u8, u8)>) {
    let mut destinations: Vec<(u8, u8)> = generated
        .map(|mv| {
            let to = mv.destination();
            (to.row, to.col)
        })
        .collect();
    destinations.sort();
    expected.sort();

    assert_eq!(destinations, expected);
}
