use crate::energy::StatisticMetadata;

/// Number of matching statistics shown below the query line.
pub const MAX_VISIBLE_MATCHES: usize = 6;

/// Change notification emitted by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// The picked statistic id. Empty when the selection was cleared.
    ValueChanged { value: String },
}

impl PickerEvent {
    pub fn cleared() -> Self {
        Self::ValueChanged {
            value: String::new(),
        }
    }
}

/// Which statistics the picker offers at all, before the query applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerFilter {
    pub units: Vec<String>,
    pub entities_only: bool,
}

impl Default for PickerFilter {
    fn default() -> Self {
        Self {
            units: vec!["kWh".to_string()],
            entities_only: true,
        }
    }
}

impl PickerFilter {
    pub fn new(units: Vec<String>, entities_only: bool) -> Self {
        Self {
            units,
            entities_only,
        }
    }

    /// Unit label shown in the field label, e.g. `kWh`.
    pub fn unit_label(&self) -> String {
        self.units.join(", ")
    }

    pub fn accepts(&self, stat: &StatisticMetadata) -> bool {
        if self.entities_only && !stat.is_entity() {
            return false;
        }
        match &stat.unit_of_measurement {
            Some(unit) => self.units.iter().any(|u| u == unit),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatisticPickerState {
    query: String,
    highlighted: usize,
    value: Option<String>,
}

impl StatisticPickerState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Statistics accepted by `filter` whose id or name contains the query
    /// (case-insensitive).
    pub fn matches<'a>(
        &self,
        catalog: &'a [StatisticMetadata],
        filter: &PickerFilter,
    ) -> Vec<&'a StatisticMetadata> {
        let needle = self.query.to_lowercase();
        catalog
            .iter()
            .filter(|stat| filter.accepts(stat))
            .filter(|stat| {
                needle.is_empty()
                    || stat.statistic_id.to_lowercase().contains(&needle)
                    || stat
                        .name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
        self.highlighted = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.highlighted = 0;
    }

    /// Move the highlight by `delta`, wrapping within `match_count` rows.
    pub fn move_highlight(&mut self, delta: isize, match_count: usize) {
        if match_count == 0 {
            self.highlighted = 0;
            return;
        }
        let count = match_count as isize;
        let current = (self.highlighted as isize).min(count - 1);
        self.highlighted = (current + delta).rem_euclid(count) as usize;
    }

    /// The event the picker emits when the highlighted row is chosen.
    pub fn pick(
        &self,
        catalog: &[StatisticMetadata],
        filter: &PickerFilter,
    ) -> Option<PickerEvent> {
        self.matches(catalog, filter)
            .get(self.highlighted)
            .map(|stat| PickerEvent::ValueChanged {
                value: stat.statistic_id.clone(),
            })
    }
}
