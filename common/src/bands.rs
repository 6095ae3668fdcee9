pub const BAND_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub label: &'static str,
    pub low_f: f32,
    pub high_f: f32,
    /// Row title on the garden temperature page.
    pub description: &'static str,
    pub range_caption: &'static str,
}

impl Band {
    /// Both bounds are exclusive.
    pub fn contains(&self, temp_f: f32) -> bool {
        self.low_f < temp_f && temp_f < self.high_f
    }
}

// 85..=86 belongs to no band. Readings there leave the band indicators and
// dwell counters untouched.
pub const BAND_TABLE: [Band; BAND_COUNT] = [
    Band {
        label: "Freezing",
        low_f: -40.0,
        high_f: 32.0,
        description: "Freezing",
        range_caption: "-40 to 32F",
    },
    Band {
        label: "Frost",
        low_f: 32.0,
        high_f: 37.0,
        description: "'Areas of Frost'",
        range_caption: "32 to 37F",
    },
    Band {
        label: "Cold",
        low_f: 37.0,
        high_f: 60.0,
        description: "Frost or Cold",
        range_caption: "37 to 60F",
    },
    Band {
        label: "Mild",
        low_f: 60.0,
        high_f: 85.0,
        description: "Cool Weather Vegetables",
        range_caption: "60 to 85F",
    },
    Band {
        label: "Hot",
        low_f: 86.0,
        high_f: 176.0,
        description: "Hot enough for anything else",
        range_caption: "86F+",
    },
];

pub fn classify(temp_f: f32) -> Option<usize> {
    BAND_TABLE.iter().position(|band| band.contains(temp_f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classifies_band_midpoints() {
        assert_eq!(classify(0.0), Some(0));
        assert_eq!(classify(34.5), Some(1));
        assert_eq!(classify(50.0), Some(2));
        assert_eq!(classify(72.0), Some(3));
        assert_eq!(classify(100.0), Some(4));
    }

    #[test]
    fn shared_bounds_belong_to_no_band() {
        for bound in [-40.0, 32.0, 37.0, 60.0, 176.0] {
            assert_eq!(classify(bound), None, "bound {bound}");
        }
    }

    #[test]
    fn gap_between_mild_and_hot_is_unclassified() {
        assert_eq!(classify(85.0), None);
        assert_eq!(classify(85.5), None);
        assert_eq!(classify(86.0), None);
        assert_eq!(classify(84.99), Some(3));
        assert_eq!(classify(86.01), Some(4));
    }

    #[test]
    fn out_of_range_readings_are_unclassified() {
        assert_eq!(classify(-60.0), None);
        assert_eq!(classify(200.0), None);
        assert_eq!(classify(f32::NAN), None);
    }

    #[test]
    fn table_is_ordered_without_overlap() {
        for pair in BAND_TABLE.windows(2) {
            assert!(pair[0].low_f < pair[0].high_f);
            assert!(pair[0].high_f <= pair[1].low_f);
        }
    }

    proptest! {
        #[test]
        fn interior_reading_matches_only_its_band(
            idx in 0..BAND_COUNT,
            fraction in 0.01f32..0.99,
        ) {
            let band = BAND_TABLE[idx];
            let temp_f = band.low_f + (band.high_f - band.low_f) * fraction;

            prop_assert_eq!(classify(temp_f), Some(idx));
            let matches = BAND_TABLE.iter().filter(|b| b.contains(temp_f)).count();
            prop_assert_eq!(matches, 1);
        }
    }
}
