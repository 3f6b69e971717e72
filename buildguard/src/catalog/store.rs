//! In-memory catalog, loaded once from a normalized dataset directory.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::build::{Build, BuildSelection, Category, Component, StorageDevice};
use crate::catalog::schema::*;
use crate::core::BuildGuardError;

/// Read-only collection of component records per category.
///
/// Records keep their on-disk order; filters never re-sort.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    cpus: Vec<Cpu>,
    motherboards: Vec<Motherboard>,
    rams: Vec<Ram>,
    gpus: Vec<Gpu>,
    cases: Vec<Case>,
    psus: Vec<Psu>,
    coolers: Vec<CpuCooler>,
    ssds: Vec<Ssd>,
    hdds: Vec<Hdd>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every category file found in `dir`.
    ///
    /// A missing file leaves that category empty. A file that exists but
    /// does not hold a JSON array of records is an error.
    pub fn load_from_directory(dir: &Path) -> Result<Self, BuildGuardError> {
        if !dir.is_dir() {
            return Err(BuildGuardError::InvalidDirectory(
                dir.to_string_lossy().to_string(),
            ));
        }

        let mut store = Self::new();
        for category in Category::ALL {
            let path = dir.join(category.catalog_file());
            if !path.is_file() {
                tracing::warn!(
                    "Catalog file {} not found; {} list is empty",
                    category.catalog_file(),
                    category
                );
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let count = store
                .insert_json(category, &content)
                .map_err(|e| match e {
                    BuildGuardError::Parse { message, .. } => BuildGuardError::Parse {
                        file: path.display().to_string(),
                        message,
                    },
                    other => other,
                })?;
            tracing::info!("Loaded {}: {} records", category, count);
        }

        Ok(store)
    }

    /// Decode a JSON array of `category` records and append them.
    pub fn insert_json(&mut self, category: Category, json: &str) -> Result<usize, BuildGuardError> {
        let origin = category.catalog_file();
        let count = match category {
            Category::Cpu => append(&mut self.cpus, json, origin)?,
            Category::Motherboard => append(&mut self.motherboards, json, origin)?,
            Category::Ram => append(&mut self.rams, json, origin)?,
            Category::Gpu => append(&mut self.gpus, json, origin)?,
            Category::Case => append(&mut self.cases, json, origin)?,
            Category::Psu => append(&mut self.psus, json, origin)?,
            Category::CpuCooler => append(&mut self.coolers, json, origin)?,
            Category::Ssd => append(&mut self.ssds, json, origin)?,
            Category::Hdd => append(&mut self.hdds, json, origin)?,
        };
        Ok(count)
    }

    /// Append a single record to its category.
    pub fn insert(&mut self, component: impl Into<Component>) {
        match component.into() {
            Component::Cpu(c) => self.cpus.push(c),
            Component::Motherboard(c) => self.motherboards.push(c),
            Component::Ram(c) => self.rams.push(c),
            Component::Gpu(c) => self.gpus.push(c),
            Component::Case(c) => self.cases.push(c),
            Component::Psu(c) => self.psus.push(c),
            Component::CpuCooler(c) => self.coolers.push(c),
            Component::Ssd(c) => self.ssds.push(c),
            Component::Hdd(c) => self.hdds.push(c),
        }
    }

    /// Builder-style `insert`.
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.insert(component);
        self
    }

    pub fn cpus(&self) -> &[Cpu] {
        &self.cpus
    }

    pub fn motherboards(&self) -> &[Motherboard] {
        &self.motherboards
    }

    pub fn rams(&self) -> &[Ram] {
        &self.rams
    }

    pub fn gpus(&self) -> &[Gpu] {
        &self.gpus
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn psus(&self) -> &[Psu] {
        &self.psus
    }

    pub fn coolers(&self) -> &[CpuCooler] {
        &self.coolers
    }

    pub fn ssds(&self) -> &[Ssd] {
        &self.ssds
    }

    pub fn hdds(&self) -> &[Hdd] {
        &self.hdds
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Cpu => self.cpus.len(),
            Category::Motherboard => self.motherboards.len(),
            Category::Ram => self.rams.len(),
            Category::Gpu => self.gpus.len(),
            Category::Case => self.cases.len(),
            Category::Psu => self.psus.len(),
            Category::CpuCooler => self.coolers.len(),
            Category::Ssd => self.ssds.len(),
            Category::Hdd => self.hdds.len(),
        }
    }

    pub fn total_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.count(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// First record in `category` whose name matches exactly.
    pub fn find(&self, category: Category, name: &str) -> Option<Component> {
        fn by_name<T: Clone + Into<Component>>(
            items: &[T],
            name: &str,
            part: impl Fn(&T) -> &PartInfo,
        ) -> Option<Component> {
            items
                .iter()
                .find(|item| part(*item).name.as_deref() == Some(name))
                .cloned()
                .map(Into::into)
        }

        match category {
            Category::Cpu => by_name(&self.cpus, name, |c| &c.part),
            Category::Motherboard => by_name(&self.motherboards, name, |c| &c.part),
            Category::Ram => by_name(&self.rams, name, |c| &c.part),
            Category::Gpu => by_name(&self.gpus, name, |c| &c.part),
            Category::Case => by_name(&self.cases, name, |c| &c.part),
            Category::Psu => by_name(&self.psus, name, |c| &c.part),
            Category::CpuCooler => by_name(&self.coolers, name, |c| &c.part),
            Category::Ssd => by_name(&self.ssds, name, |c| &c.part),
            Category::Hdd => by_name(&self.hdds, name, |c| &c.part),
        }
    }

    /// Turn a named selection into a [`Build`] by looking every name up.
    pub fn resolve(&self, selection: &BuildSelection) -> Result<Build, BuildGuardError> {
        let mut build = Build::new();
        for (category, name) in selection.entries() {
            let component = self
                .find(category, name)
                .ok_or_else(|| unknown(category, name))?;
            build.set(component);
        }

        for name in &selection.ram_modules {
            let ram = self
                .rams
                .iter()
                .find(|r| r.part.name.as_deref() == Some(name.as_str()))
                .ok_or_else(|| unknown(Category::Ram, name))?;
            build.ram_modules.push(ram.clone());
        }

        for name in &selection.storage_devices {
            let ssd = self
                .ssds
                .iter()
                .find(|d| d.part.name.as_deref() == Some(name.as_str()));
            let device = match ssd {
                Some(ssd) => StorageDevice::Ssd(ssd.clone()),
                None => self
                    .hdds
                    .iter()
                    .find(|d| d.part.name.as_deref() == Some(name.as_str()))
                    .map(|hdd| StorageDevice::Hdd(hdd.clone()))
                    .ok_or_else(|| BuildGuardError::UnknownStorage(name.clone()))?,
            };
            build.storage_devices.push(device);
        }

        Ok(build)
    }
}

fn unknown(category: Category, name: &str) -> BuildGuardError {
    BuildGuardError::UnknownComponent {
        category,
        name: name.to_string(),
    }
}

fn append<T: DeserializeOwned>(
    target: &mut Vec<T>,
    json: &str,
    origin: &str,
) -> Result<usize, BuildGuardError> {
    let records: Vec<T> = serde_json::from_str(json).map_err(|e| BuildGuardError::Parse {
        file: origin.to_string(),
        message: e.to_string(),
    })?;
    let count = records.len();
    target.extend(records);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_json_keeps_order() {
        let mut store = CatalogStore::new();
        let n = store
            .insert_json(
                Category::Cpu,
                r#"[{"name": "B"}, {"name": "A"}, {"name": "C"}]"#,
            )
            .unwrap();

        assert_eq!(n, 3);
        let names: Vec<_> = store
            .cpus()
            .iter()
            .filter_map(|c| c.part.name.as_deref())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_insert_json_rejects_non_array() {
        let mut store = CatalogStore::new();
        let err = store
            .insert_json(Category::Gpu, r#"{"name": "not a list"}"#)
            .unwrap_err();
        assert!(matches!(err, BuildGuardError::Parse { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_one_malformed_record_does_not_sink_the_file() {
        let mut store = CatalogStore::new();
        let n = store
            .insert_json(
                Category::Cpu,
                r#"[
                    {"name": "ok", "architecture": {"socket": "AM4"}},
                    {"name": "bad", "architecture": null}
                ]"#,
            )
            .unwrap();

        assert_eq!(n, 2);
        assert_eq!(store.cpus()[0].socket(), Some("AM4"));
        assert_eq!(store.cpus()[1].socket(), None);

        let n = store
            .insert_json(Category::Case, r#"[{"name": "small", "fan_support": {"80mm": "2/4"}}]"#)
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn test_find_by_exact_name() {
        let mut psu = Psu::default();
        psu.part.name = Some("RM850x".to_string());
        let store = CatalogStore::new().with(psu);

        assert!(matches!(
            store.find(Category::Psu, "RM850x"),
            Some(Component::Psu(_))
        ));
        assert!(store.find(Category::Psu, "rm850x").is_none());
        assert!(store.find(Category::Cpu, "RM850x").is_none());
    }

    #[test]
    fn test_resolve_selection() {
        let mut ram = Ram::default();
        ram.part.name = Some("kit".to_string());
        let mut hdd = Hdd::default();
        hdd.part.name = Some("disk".to_string());
        let store = CatalogStore::new().with(ram).with(hdd);

        let selection = BuildSelection {
            ram: Some("kit".into()),
            ram_modules: vec!["kit".into(), "kit".into()],
            storage_devices: vec!["disk".into()],
            ..Default::default()
        };
        let build = store.resolve(&selection).unwrap();
        assert!(build.ram().is_some());
        assert_eq!(build.ram_modules.len(), 2);
        assert!(matches!(build.storage_devices[..], [StorageDevice::Hdd(_)]));

        let missing = BuildSelection {
            gpu: Some("kit".into()),
            ..Default::default()
        };
        assert!(matches!(
            store.resolve(&missing),
            Err(BuildGuardError::UnknownComponent { category: Category::Gpu, .. })
        ));

        let missing_disk = BuildSelection {
            storage_devices: vec!["floppy".into()],
            ..Default::default()
        };
        let err = store.resolve(&missing_disk).unwrap_err();
        assert!(matches!(&err, BuildGuardError::UnknownStorage(name) if name == "floppy"));
        assert_eq!(err.to_string(), "No SSD or HDD named 'floppy' in the catalog");
    }

    #[test]
    fn test_counts() {
        let store = CatalogStore::new()
            .with(Cpu::default())
            .with(Cpu::default())
            .with(Hdd::default());
        assert_eq!(store.count(Category::Cpu), 2);
        assert_eq!(store.count(Category::Hdd), 1);
        assert_eq!(store.count(Category::Ssd), 0);
        assert_eq!(store.total_count(), 3);
    }
}
