use crate::segments::Segment;

/// Extend each segment's end to the next segment's start wherever there is a gap.
///
/// Overlapping pairs are left as they are. Running this twice is the same as running it once.
pub fn close_gaps(segments: &mut [Segment]) {
    for i in 1..segments.len() {
        let next_start = segments[i].start_seconds;
        let current = &mut segments[i - 1];
        if current.end_seconds < next_start {
            current.end_seconds = next_start;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_is_closed() {
        let mut segs = vec![Segment::new(0.0, 1.0, "a"), Segment::new(1.5, 2.0, "b")];
        close_gaps(&mut segs);
        assert_eq!(
            segs,
            vec![Segment::new(0.0, 1.5, "a"), Segment::new(1.5, 2.0, "b")]
        );
    }

    #[test]
    fn overlaps_are_untouched_and_second_pass_is_a_no_op() {
        let mut segs = vec![
            Segment::new(0.0, 1.2, "a"),
            Segment::new(1.0, 2.0, "b"),
            Segment::new(3.0, 4.0, "c"),
        ];
        close_gaps(&mut segs);
        assert_eq!(segs[0].end_seconds, 1.2);
        assert_eq!(segs[1].end_seconds, 3.0);
        assert_eq!(segs[2].end_seconds, 4.0);

        let once = segs.clone();
        close_gaps(&mut segs);
        assert_eq!(segs, once);
    }

    #[test]
    fn empty_and_single_are_fine() {
        let mut none: Vec<Segment> = Vec::new();
        close_gaps(&mut none);
        let mut one = vec![Segment::new(0.0, 1.0, "a")];
        close_gaps(&mut one);
        assert_eq!(one[0].end_seconds, 1.0);
    }
}
