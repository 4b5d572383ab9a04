use std::collections::BTreeMap;

use menuplan_shared::{BaseSlot, Day};
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{MealKey, MealPlan, SlotKey};

/// Label given to a custom slot added with a blank label.
pub const DEFAULT_CUSTOM_SLOT_LABEL: &str = "Additional Item";

/// Label of a slot nothing else knows a name for.
pub const FALLBACK_SLOT_LABEL: &str = "Additional Menu";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CustomSlot {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SlotView {
    pub key: SlotKey,
    pub label: String,
    pub is_custom: bool,
}

/// Custom slots registered per day, in the order they were added.
///
/// This is the source of truth for which custom slots exist; anything that
/// renders slot inputs is a projection of it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct SlotRegistry {
    days: BTreeMap<Day, Vec<CustomSlot>>,
}

impl SlotRegistry {
    pub fn add_custom_slot(&mut self, day: Day, label: impl AsRef<str>) -> String {
        let label = match label.as_ref().trim() {
            "" => DEFAULT_CUSTOM_SLOT_LABEL,
            label => label,
        };

        let slot = CustomSlot {
            id: menuplan_shared::new_id(),
            label: label.to_owned(),
        };
        let id = slot.id.to_owned();
        self.days.entry(day).or_default().push(slot);

        id
    }

    pub fn remove_custom_slot(&mut self, day: Day, id: &str) -> Option<CustomSlot> {
        let slots = self.days.get_mut(&day)?;
        let position = slots.iter().position(|slot| slot.id == id)?;
        let removed = slots.remove(position);

        if slots.is_empty() {
            self.days.remove(&day);
        }

        Some(removed)
    }

    /// Registers a slot under a known id; no-op when the id already exists.
    pub fn register(&mut self, day: Day, slot: CustomSlot) -> bool {
        if self.contains(day, &slot.id) {
            return false;
        }

        self.days.entry(day).or_default().push(slot);

        true
    }

    pub fn contains(&self, day: Day, id: &str) -> bool {
        self.custom_slots(day).iter().any(|slot| slot.id == id)
    }

    pub fn custom_slots(&self, day: Day) -> &[CustomSlot] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn custom_label(&self, day: Day, id: &str) -> Option<&str> {
        self.custom_slots(day)
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| slot.label.as_str())
    }

    /// Base slots first, then custom slots in registration order.
    pub fn list_slots(&self, day: Day) -> Vec<SlotView> {
        let base = BaseSlot::VARIANTS.iter().map(|slot| SlotView {
            key: SlotKey::Base(*slot),
            label: slot.label().to_owned(),
            is_custom: false,
        });

        let custom = self.custom_slots(day).iter().map(|slot| SlotView {
            key: SlotKey::Custom(slot.id.to_owned()),
            label: slot.label.to_owned(),
            is_custom: true,
        });

        base.chain(custom).collect()
    }

    /// Whether a meal under `slot` on `day` is backed by an existing slot.
    pub fn is_active(&self, day: Day, slot: &SlotKey) -> bool {
        match slot {
            SlotKey::Base(_) => true,
            SlotKey::Custom(id) => self.contains(day, id),
        }
    }

    pub fn active_keys(&self) -> impl Iterator<Item = MealKey> + '_ {
        Day::VARIANTS.iter().flat_map(move |day| {
            self.list_slots(*day)
                .into_iter()
                .map(move |view| MealKey::new(*day, view.key))
        })
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Display label of a slot.
///
/// Precedence: the fixed base-slot label, then the registered custom label,
/// then the label stored on the meal itself, then [`FALLBACK_SLOT_LABEL`].
pub fn resolve_label(day: Day, slot: &SlotKey, registry: &SlotRegistry, plan: &MealPlan) -> String {
    if let SlotKey::Base(base) = slot {
        return base.label().to_owned();
    }

    if let SlotKey::Custom(id) = slot
        && let Some(label) = registry.custom_label(day, id)
    {
        return label.to_owned();
    }

    match plan.get(day, slot) {
        Some(meal) if !meal.slot_label.trim().is_empty() => meal.slot_label.to_owned(),
        _ => FALLBACK_SLOT_LABEL.to_owned(),
    }
}
