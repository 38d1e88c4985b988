//! The fixed scenarios every experiment runs

/// One test scenario: a prompt applied to a fixed list of input images,
/// with an optional positional ground-truth list.
#[derive(Debug, Clone, Copy)]
pub struct TestSpec {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,

    /// Input images, queried in this order in every mode
    pub images: &'static [&'static str],

    /// Known counts, positionally aligned with `images`. May be shorter
    /// than (or empty relative to) the image list; missing entries mean no
    /// ground truth for that image.
    pub ground_truth: &'static [i64],
}

impl TestSpec {
    /// Ground truth for the image at `index`, when the scenario defines one
    pub fn ground_truth_for(&self, index: usize) -> Option<i64> {
        self.ground_truth.get(index).copied()
    }
}

/// The built-in suite, in run order
pub static BUILTIN_SUITE: &[TestSpec] = &[
    TestSpec {
        id: 1,
        name: "finger_counting",
        description: "Count fingers in hand images",
        prompt: "Count the exact number of fingers shown in this image. Be precise.",
        images: &[
            "fingers_1.jpg",
            "fingers_3.jpg",
            "fingers_5.jpg",
            "fingers_7.jpg",
            "fingers_10.jpg",
        ],
        ground_truth: &[1, 3, 5, 7, 10],
    },
    TestSpec {
        id: 2,
        name: "coin_counting",
        description: "Count coins on surface",
        prompt: "Count the exact number of coins in this image. Give me a precise count, not an estimate.",
        images: &["coins_8.jpg", "coins_15.jpg", "coins_23.jpg"],
        ground_truth: &[8, 15, 23],
    },
    TestSpec {
        id: 3,
        name: "rebar_counting",
        description: "Count rebar pieces (construction domain)",
        prompt: "Count the exact number of rebar pieces (metal reinforcement bars) visible in this image. Mark each one you count.",
        images: &["rebar_grid_1.jpg", "rebar_grid_2.jpg", "rebar_stack.jpg"],
        // TODO: fill in once the rebar images have verified counts
        ground_truth: &[],
    },
    TestSpec {
        id: 4,
        name: "table_extraction",
        description: "Extract values from dense tables",
        prompt: "Extract all values from this table as a JSON object. Include every cell value exactly as shown.",
        images: &["table_financial.png", "table_materials.jpg"],
        ground_truth: &[],
    },
    TestSpec {
        id: 5,
        name: "ppe_detection",
        description: "Detect PPE on construction workers",
        prompt: "Identify all Personal Protective Equipment (PPE) items worn by workers in this image. List each item and mark its location if possible.",
        images: &[
            "construction_ppe_1.jpg",
            "construction_ppe_2.jpg",
            "construction_ppe_3.jpg",
        ],
        ground_truth: &[],
    },
    TestSpec {
        id: 6,
        name: "blueprint_reading",
        description: "Read measurements from blueprints",
        prompt: "Read all the measurements and dimensions shown on this blueprint/floor plan. List each measurement with its location.",
        images: &["blueprint_1.png", "blueprint_2.png"],
        ground_truth: &[],
    },
    TestSpec {
        id: 7,
        name: "receipt_math",
        description: "Calculate total from receipt",
        prompt: "Read all the line items on this receipt and calculate the total. Show your work.",
        images: &["receipt_1.jpg", "receipt_2.jpg"],
        ground_truth: &[],
    },
];

/// Look up a scenario by id
pub fn find_test(id: u32) -> Option<&'static TestSpec> {
    BUILTIN_SUITE.iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_ids_are_unique_and_ordered() {
        let ids: Vec<u32> = BUILTIN_SUITE.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_ground_truth_positional_lookup() {
        let fingers = find_test(1).unwrap();
        assert_eq!(fingers.ground_truth_for(0), Some(1));
        assert_eq!(fingers.ground_truth_for(4), Some(10));
        assert_eq!(fingers.ground_truth_for(5), None);

        let rebar = find_test(3).unwrap();
        assert_eq!(rebar.ground_truth_for(0), None);
    }

    #[test]
    fn test_ground_truth_never_longer_than_images() {
        for spec in BUILTIN_SUITE {
            assert!(
                spec.ground_truth.len() <= spec.images.len(),
                "{} has more ground truths than images",
                spec.name
            );
        }
    }

    #[test]
    fn test_find_test_unknown_id() {
        assert!(find_test(99).is_none());
    }
}
