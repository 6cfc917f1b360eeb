//! Assignment of components to the two profile steps.
//!
//! A [`Partition`] is valid when every registered component lands on exactly
//! one of step 2 or step 3 and neither step is left empty. The rule treats
//! each step as a set: repeating a component inside one step is tolerated,
//! placing it on both steps is not.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::component::{Component, ALL_COMPONENTS};
use crate::constants::INITIAL_CONFIG_VERSION;
use crate::error::{DomainError, DomainResult};
use crate::onboarding::ProfileStep;

/// Message prefix shared by every partition violation
const PARTITION_RULE: &str =
    "Each component must appear on exactly one of steps 2 or 3, and both steps need at least one";

/// Components shown on step 2 and step 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Partition {
    /// Components collected on step 2
    #[cfg_attr(feature = "openapi", schema(example = json!(["ABOUT_ME"])))]
    pub step2: Vec<Component>,
    /// Components collected on step 3
    #[cfg_attr(feature = "openapi", schema(example = json!(["ADDRESS", "BIRTHDATE"])))]
    pub step3: Vec<Component>,
}

impl Default for Partition {
    fn default() -> Self {
        Self {
            step2: vec![Component::AboutMe],
            step3: vec![Component::Address, Component::Birthdate],
        }
    }
}

impl Partition {
    pub fn new(step2: Vec<Component>, step3: Vec<Component>) -> Self {
        Self { step2, step3 }
    }

    /// Check the partition rule, describing the first violation found.
    pub fn validate(&self) -> DomainResult<()> {
        if self.step2.is_empty() || self.step3.is_empty() {
            return Err(DomainError::partition(format!(
                "{}: a step has no components",
                PARTITION_RULE
            )));
        }

        let step2: BTreeSet<Component> = self.step2.iter().copied().collect();
        let step3: BTreeSet<Component> = self.step3.iter().copied().collect();

        if let Some(shared) = step2.intersection(&step3).next() {
            return Err(DomainError::partition(format!(
                "{}: {} is assigned to both steps",
                PARTITION_RULE, shared
            )));
        }

        let missing: Vec<&str> = ALL_COMPONENTS
            .iter()
            .filter(|c| !step2.contains(c) && !step3.contains(c))
            .map(Component::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::partition(format!(
                "{}: {} not assigned to any step",
                PARTITION_RULE,
                missing.join(", ")
            )));
        }

        Ok(())
    }

    /// Components displayed on the given step
    pub fn components_for(&self, step: ProfileStep) -> &[Component] {
        match step {
            ProfileStep::Second => &self.step2,
            ProfileStep::Third => &self.step3,
        }
    }

    /// Display component C on step N iff C is a member of that step's list.
    pub fn displays(&self, component: Component, step: ProfileStep) -> bool {
        self.components_for(step).contains(&component)
    }
}

/// Returns true iff the partition rule holds.
pub fn is_valid_partition(partition: &Partition) -> bool {
    partition.validate().is_ok()
}

/// The persisted singleton configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub partition: Partition,
    /// Incremented on every replacement
    pub version: i64,
    pub updated_at: DateTime<Utc>,
}

impl Configuration {
    /// Built-in configuration used when nothing has been stored yet
    pub fn seed() -> Self {
        Self {
            partition: Partition::default(),
            version: INITIAL_CONFIG_VERSION,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Component::*;

    #[test]
    fn test_default_partition_is_valid() {
        let partition = Partition::default();
        assert!(is_valid_partition(&partition));
        assert_eq!(partition.step2, vec![AboutMe]);
        assert_eq!(partition.step3, vec![Address, Birthdate]);
    }

    #[test]
    fn test_moving_address_to_step2_is_valid() {
        let partition = Partition::new(vec![AboutMe, Address], vec![Birthdate]);
        assert!(is_valid_partition(&partition));
    }

    #[test]
    fn test_component_on_both_steps_rejected() {
        let partition = Partition::new(vec![AboutMe], vec![AboutMe, Address, Birthdate]);
        let err = partition.validate().unwrap_err();
        assert!(matches!(err, DomainError::PartitionInvalid(ref msg) if msg.contains("ABOUT_ME")));
    }

    #[test]
    fn test_unassigned_component_rejected() {
        let partition = Partition::new(vec![AboutMe], vec![Address]);
        let err = partition.validate().unwrap_err();
        assert!(matches!(err, DomainError::PartitionInvalid(ref msg) if msg.contains("BIRTHDATE")));
    }

    #[test]
    fn test_empty_step_rejected() {
        let partition = Partition::new(vec![], vec![AboutMe, Address, Birthdate]);
        assert!(!is_valid_partition(&partition));

        let partition = Partition::new(vec![AboutMe, Address, Birthdate], vec![]);
        assert!(!is_valid_partition(&partition));
    }

    #[test]
    fn test_duplicate_within_one_step_tolerated() {
        let partition = Partition::new(vec![AboutMe, AboutMe], vec![Address, Birthdate]);
        assert!(is_valid_partition(&partition));

        let partition = Partition::new(vec![AboutMe], vec![Address, Birthdate, Address]);
        assert!(is_valid_partition(&partition));
    }

    #[test]
    fn test_every_assignment_of_three_components() {
        // Each component independently on step 2 or step 3; valid unless one side is empty.
        for mask in 0u8..8 {
            let (mut step2, mut step3) = (Vec::new(), Vec::new());
            for (i, c) in ALL_COMPONENTS.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    step2.push(*c);
                } else {
                    step3.push(*c);
                }
            }
            let expected = !step2.is_empty() && !step3.is_empty();
            assert_eq!(is_valid_partition(&Partition::new(step2, step3)), expected);
        }
    }

    #[test]
    fn test_displays_by_membership() {
        let partition = Partition::default();
        assert!(partition.displays(AboutMe, ProfileStep::Second));
        assert!(!partition.displays(AboutMe, ProfileStep::Third));
        assert!(partition.displays(Birthdate, ProfileStep::Third));
    }

    #[test]
    fn test_partition_json_shape() {
        let json = serde_json::to_value(Partition::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"step2": ["ABOUT_ME"], "step3": ["ADDRESS", "BIRTHDATE"]})
        );
    }
}
