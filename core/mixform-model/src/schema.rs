use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::field::SchemaField;
use crate::trigger::TriggerCondition;
use crate::validate::{validate_intersection, validate_mixin};

/// A mixin that becomes active when `trigger` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildMixin {
    pub mixin: String,
    pub trigger: TriggerCondition,
}

impl ChildMixin {
    pub fn new(mixin: &str, trigger: TriggerCondition) -> Self {
        Self {
            mixin: mixin.into(),
            trigger,
        }
    }
}

/// A named, reusable bundle of form fields plus the rules that activate
/// further mixins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mixin {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
    #[serde(default)]
    pub children: Vec<ChildMixin>,
}

impl Mixin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_child(mut self, mixin: &str, trigger: TriggerCondition) -> Self {
        self.children.push(ChildMixin::new(mixin, trigger));
        self
    }
}

/// Extra fields shown only while every mixin in `when` is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRule {
    pub when: Vec<String>,
    pub adds: Vec<SchemaField>,
}

impl IntersectionRule {
    pub fn new(when: &[&str], adds: Vec<SchemaField>) -> Self {
        Self {
            when: when.iter().map(|s| s.to_string()).collect(),
            adds,
        }
    }
}

/// A complete form definition: where evaluation starts, the mixins it can
/// reach, and the cross-mixin additions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub root_mixins: Vec<String>,
    #[serde(default)]
    pub mixins: BTreeMap<String, Mixin>,
    #[serde(default)]
    pub intersections: Vec<IntersectionRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, mixin: &str) -> Self {
        self.root_mixins.push(mixin.into());
        self
    }

    pub fn with_mixin(mut self, mixin: Mixin) -> Self {
        self.insert_mixin(mixin);
        self
    }

    pub fn with_intersection(mut self, rule: IntersectionRule) -> Self {
        self.intersections.push(rule);
        self
    }

    pub fn mixin(&self, name: &str) -> Option<&Mixin> {
        self.mixins.get(name)
    }

    /// Inserts or replaces a mixin under its own name.
    pub fn insert_mixin(&mut self, mixin: Mixin) -> Option<Mixin> {
        self.mixins.insert(mixin.name.clone(), mixin)
    }

    pub fn remove_mixin(&mut self, name: &str) -> Option<Mixin> {
        self.mixins.remove(name)
    }

    pub fn is_root(&self, name: &str) -> bool {
        self.root_mixins.iter().any(|m| m == name)
    }

    /// Checks every authoring invariant, including that all mixin
    /// references resolve.
    pub fn validate(&self) -> ModelResult<()> {
        for (key, mixin) in &self.mixins {
            if key != &mixin.name {
                return Err(ModelError::InvalidMixin {
                    mixin: key.clone(),
                    reason: format!("stored under '{key}' but named '{}'", mixin.name),
                });
            }
            validate_mixin(mixin)?;
        }
        for mixin in self.mixins.values() {
            for child in &mixin.children {
                self.require_mixin(&format!("mixin '{}'", mixin.name), &child.mixin)?;
            }
        }

        let mut seen = HashSet::new();
        for root in &self.root_mixins {
            if !seen.insert(root.as_str()) {
                return Err(ModelError::DuplicateName {
                    scope: "root_mixins".into(),
                    name: root.clone(),
                });
            }
            self.require_mixin("root_mixins", root)?;
        }

        for (index, rule) in self.intersections.iter().enumerate() {
            validate_intersection(index, rule)?;
            for name in &rule.when {
                self.require_mixin(&format!("intersection #{index}"), name)?;
            }
        }
        Ok(())
    }

    fn require_mixin(&self, from: &str, name: &str) -> ModelResult<()> {
        if self.mixins.contains_key(name) {
            Ok(())
        } else {
            Err(ModelError::DanglingReference {
                from: from.into(),
                to: name.into(),
            })
        }
    }
}
