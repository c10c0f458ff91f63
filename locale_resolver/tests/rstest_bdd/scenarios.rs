//! Binds the feature files to the step registry.

use crate::fixtures::{ResolutionContext, SettingsContext, resolution, settings};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/resolution.feature",
    fixtures = [resolution: ResolutionContext]
);
scenarios!(
    "tests/features/settings.feature",
    fixtures = [settings: SettingsContext]
);
