//! Property tests for structure invariants and the zoom clamp

use formwizard::browser::zoom_percent;
use formwizard::utils::is_valid_wizard_id;
use formwizard::validate_structure;
use proptest::prelude::*;

mod common;
use common::{continue_button, sample_structure, text_field};

proptest! {
    #[test]
    fn contiguous_structures_of_any_length_validate(n in 1usize..6) {
        let mut structure = sample_structure();
        structure.pages.truncate(1);
        structure.pages[0].continue_button = Some(continue_button());

        for i in 1..n {
            let mut page = structure.pages[0].clone();
            page.page_number = i as u32 + 1;
            page.fields = vec![text_field(
                &format!("extra_{i}"),
                &format!("#Extra{i}"),
                false,
            )];
            structure.pages.push(page);
        }
        // Terminal page loses its continue button.
        if let Some(last) = structure.pages.last_mut() {
            last.continue_button = None;
        }
        structure.total_pages = structure.pages.len() as u32;

        let report = validate_structure(&structure);
        prop_assert!(report.is_complete, "{:?}", report.warnings);
    }

    #[test]
    fn wrong_page_number_is_always_flagged(wrong in 0u32..1000) {
        prop_assume!(wrong != 2);
        let mut structure = sample_structure();
        structure.pages[1].page_number = wrong;

        let report = validate_structure(&structure);
        prop_assert!(!report.is_complete);
    }

    #[test]
    fn zoom_stays_clamped(content in 0.0f64..100_000.0, viewport in 1.0f64..10_000.0) {
        let zoom = zoom_percent(content, viewport);
        prop_assert!((30..=100).contains(&zoom));
        if content <= viewport {
            prop_assert_eq!(zoom, 100);
        }
    }

    #[test]
    fn slugs_accept_only_lowercase_hyphen_alnum(s in "[a-z0-9-]{1,30}") {
        prop_assert!(is_valid_wizard_id(&s));
    }

    #[test]
    fn slugs_reject_uppercase_and_spaces(s in "[A-Z ]{1,10}") {
        prop_assert!(!is_valid_wizard_id(&s));
    }
}
