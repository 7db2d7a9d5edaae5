use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::common::{FieldKind, FALSE_LITERAL, TRUE_LITERAL};
use crate::errors::{ErrorKind, QuartermasterError, QuartermasterResult};
use crate::filter::{
    coerce_number, Condition, FieldPath, FilterOperator, FilterSequence, UnknownOperatorPolicy,
};
use crate::record::AssetType;

static ITEM_CATALOG: LazyLock<FieldCatalog> = LazyLock::new(|| {
    FieldCatalog::new(AssetType::Item)
        .with_field("quantity", "Quantity", FieldKind::Number)
        .with_field("model.name", "Name", FieldKind::String)
        .with_field("model.type", "Type", FieldKind::String)
        .with_field("model.weight", "Weight", FieldKind::Number)
        .with_field("model.stackable", "Stackable", FieldKind::Boolean)
});

static SHIP_CATALOG: LazyLock<FieldCatalog> =
    LazyLock::new(|| craft_catalog(AssetType::Ship));

static VEHICLE_CATALOG: LazyLock<FieldCatalog> =
    LazyLock::new(|| craft_catalog(AssetType::Vehicle));

// ships and vehicles share one layout
fn craft_catalog(asset_type: AssetType) -> FieldCatalog {
    FieldCatalog::new(asset_type)
        .with_field("name", "Name", FieldKind::String)
        .with_field("crewCapacity", "Crew Capacity", FieldKind::Number)
        .with_field("cargoCapacity", "Cargo Capacity", FieldKind::Number)
        .with_field("passengerCapacity", "Passenger Capacity", FieldKind::Number)
        .with_field("model.name", "Model", FieldKind::String)
        .with_field("model.manufacturer", "Manufacturer", FieldKind::String)
}

/// One addressable field of an asset type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    path: FieldPath,
    label: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(path: &str, label: &str, kind: FieldKind) -> Self {
        FieldDescriptor {
            path: FieldPath::parse(path),
            label: label.to_string(),
            kind,
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Operators with defined semantics for this field's kind.
    pub fn operators(&self) -> &'static [FilterOperator] {
        FilterOperator::operators_for(self.kind)
    }
}

/// The schema of filterable fields for one [AssetType].
///
/// A catalog turns free-form `(field, operator, value)` input into checked
/// [Condition]s: the field must exist, the operator must have semantics for the
/// field's kind, and the literal must be readable as that kind. Evaluation
/// itself does not need a catalog; records that do not follow it simply fail
/// to match.
///
/// # Examples
///
/// ```rust,ignore
/// use quartermaster::catalog::FieldCatalog;
/// use quartermaster::record::AssetType;
///
/// let ships = FieldCatalog::for_asset(AssetType::Ship);
/// let condition = ships.condition("crewCapacity", "greater_than", "4")?;
/// assert!(ships.condition("crewSize", "equals", "4").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct FieldCatalog {
    asset_type: AssetType,
    fields: IndexMap<String, FieldDescriptor>,
}

impl FieldCatalog {
    /// Creates an empty catalog for `asset_type`.
    pub fn new(asset_type: AssetType) -> Self {
        FieldCatalog {
            asset_type,
            fields: IndexMap::new(),
        }
    }

    /// Returns the built-in catalog for `asset_type`.
    pub fn for_asset(asset_type: AssetType) -> &'static FieldCatalog {
        match asset_type {
            AssetType::Item => &*ITEM_CATALOG,
            AssetType::Ship => &*SHIP_CATALOG,
            AssetType::Vehicle => &*VEHICLE_CATALOG,
        }
    }

    /// Adds or replaces a field.
    pub fn with_field(mut self, path: &str, label: &str, kind: FieldKind) -> Self {
        self.fields
            .insert(path.to_string(), FieldDescriptor::new(path, label, kind));
        self
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn descriptor(&self, path: &str) -> Option<&FieldDescriptor> {
        self.fields.get(path)
    }

    /// Operators valid for the field at `path`.
    pub fn operators_for(&self, path: &str) -> QuartermasterResult<&'static [FilterOperator]> {
        Ok(self.require(path)?.operators())
    }

    /// Builds a checked condition from form input.
    pub fn condition(&self, path: &str, operator: &str, value: &str) -> QuartermasterResult<Condition> {
        let condition = Condition::new(path, FilterOperator::from_name(operator), value);
        self.validate_condition(&condition)?;
        Ok(condition)
    }

    /// Checks one condition against the catalog.
    pub fn validate_condition(&self, condition: &Condition) -> QuartermasterResult<()> {
        let descriptor = self.require(condition.field())?;
        let operator = condition.operator();

        if !operator.is_known() {
            log::error!("Unknown operator {} on field {}", operator, condition.field());
            return Err(QuartermasterError::new(
                &format!("Unknown operator {}", operator),
                ErrorKind::FilterError,
            ));
        }

        if !operator.supports(descriptor.kind()) {
            log::error!(
                "Operator {} is not valid for {} field {}",
                operator,
                descriptor.kind(),
                condition.field()
            );
            return Err(QuartermasterError::new(
                &format!(
                    "Operator {} is not valid for {} field {}",
                    operator,
                    descriptor.kind(),
                    condition.field()
                ),
                ErrorKind::FilterError,
            ));
        }

        match descriptor.kind() {
            FieldKind::Number if coerce_number(condition.value()).is_nan() => {
                log::error!("{:?} is not a number for field {}", condition.value(), condition.field());
                Err(QuartermasterError::new(
                    &format!("{:?} is not a number", condition.value()),
                    ErrorKind::InvalidDataType,
                ))
            }
            FieldKind::Boolean
                if condition.value() != TRUE_LITERAL && condition.value() != FALSE_LITERAL =>
            {
                log::error!("{:?} is not a boolean for field {}", condition.value(), condition.field());
                Err(QuartermasterError::new(
                    &format!("{:?} is not a boolean, expected true or false", condition.value()),
                    ErrorKind::InvalidDataType,
                ))
            }
            _ => Ok(()),
        }
    }

    /// Checks every condition of `sequence`, reporting the first failure with
    /// its position.
    pub fn validate(&self, sequence: &FilterSequence) -> QuartermasterResult<()> {
        self.validate_sequence(sequence, |condition| self.validate_condition(condition))
    }

    /// Checks a saved sequence. Under [`UnknownOperatorPolicy::Pass`] a condition
    /// with an unrecognised operator only needs a known field, since its literal
    /// has no defined reading; under [`UnknownOperatorPolicy::Reject`] the rules
    /// of [`FieldCatalog::validate`] apply.
    pub fn validate_with(
        &self,
        sequence: &FilterSequence,
        policy: UnknownOperatorPolicy,
    ) -> QuartermasterResult<()> {
        self.validate_sequence(sequence, |condition| {
            if policy == UnknownOperatorPolicy::Pass && !condition.operator().is_known() {
                log::debug!(
                    "Keeping unknown operator {} on field {}",
                    condition.operator(),
                    condition.field()
                );
                self.require(condition.field()).map(|_| ())
            } else {
                self.validate_condition(condition)
            }
        })
    }

    fn validate_sequence<F>(&self, sequence: &FilterSequence, check: F) -> QuartermasterResult<()>
    where
        F: Fn(&Condition) -> QuartermasterResult<()>,
    {
        for (index, condition) in sequence.conditions().enumerate() {
            if let Err(cause) = check(condition) {
                return Err(QuartermasterError::new_with_cause(
                    &format!("Invalid condition {} for {} catalog", index, self.asset_type),
                    ErrorKind::ValidationError,
                    cause,
                ));
            }
        }
        Ok(())
    }

    fn require(&self, path: &str) -> QuartermasterResult<&FieldDescriptor> {
        self.descriptor(path).ok_or_else(|| {
            log::error!("Field {} is not filterable for {}", path, self.asset_type);
            QuartermasterError::new(
                &format!("Field {} is not filterable for {}", path, self.asset_type),
                ErrorKind::InvalidFieldName,
            )
        })
    }
}
