//! Categories, components and the user's (possibly partial) build.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::catalog::schema::{
    Case, Cpu, CpuCooler, Gpu, Hdd, Motherboard, PartInfo, Psu, Ram, Ssd,
};
use crate::core::BuildGuardError;

/// The nine component kinds a build can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cpu,
    Motherboard,
    Ram,
    Gpu,
    Case,
    Psu,
    CpuCooler,
    Ssd,
    Hdd,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Gpu,
        Category::Case,
        Category::Psu,
        Category::CpuCooler,
        Category::Ssd,
        Category::Hdd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Ram => "ram",
            Category::Gpu => "gpu",
            Category::Case => "case",
            Category::Psu => "psu",
            Category::CpuCooler => "cpu_cooler",
            Category::Ssd => "ssd",
            Category::Hdd => "hdd",
        }
    }

    /// File name of this category inside a normalized catalog directory.
    pub fn catalog_file(&self) -> &'static str {
        match self {
            Category::Cpu => "CPUData_normalized.json",
            Category::Motherboard => "MotherboardData_normalized.json",
            Category::Ram => "RAMData_normalized.json",
            Category::Gpu => "GPUData_normalized.json",
            Category::Case => "CaseData_normalized.json",
            Category::Psu => "PSUData_normalized.json",
            Category::CpuCooler => "CPUCoolerData_normalized.json",
            Category::Ssd => "SSDData_normalized.json",
            Category::Hdd => "HDDData_normalized.json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Motherboard => "Motherboard",
            Category::Ram => "RAM",
            Category::Gpu => "GPU",
            Category::Case => "Case",
            Category::Psu => "PSU",
            Category::CpuCooler => "CPU cooler",
            Category::Ssd => "SSD",
            Category::Hdd => "HDD",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = BuildGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == key)
            .or_else(|| (key == "cooler").then_some(Category::CpuCooler))
            .ok_or_else(|| BuildGuardError::UnknownCategory(s.to_string()))
    }
}

/// One catalog record, tagged by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Component {
    Cpu(Cpu),
    Motherboard(Motherboard),
    Ram(Ram),
    Gpu(Gpu),
    Case(Case),
    Psu(Psu),
    CpuCooler(CpuCooler),
    Ssd(Ssd),
    Hdd(Hdd),
}

impl Component {
    pub fn category(&self) -> Category {
        match self {
            Component::Cpu(_) => Category::Cpu,
            Component::Motherboard(_) => Category::Motherboard,
            Component::Ram(_) => Category::Ram,
            Component::Gpu(_) => Category::Gpu,
            Component::Case(_) => Category::Case,
            Component::Psu(_) => Category::Psu,
            Component::CpuCooler(_) => Category::CpuCooler,
            Component::Ssd(_) => Category::Ssd,
            Component::Hdd(_) => Category::Hdd,
        }
    }

    pub fn part(&self) -> &PartInfo {
        match self {
            Component::Cpu(c) => &c.part,
            Component::Motherboard(c) => &c.part,
            Component::Ram(c) => &c.part,
            Component::Gpu(c) => &c.part,
            Component::Case(c) => &c.part,
            Component::Psu(c) => &c.part,
            Component::CpuCooler(c) => &c.part,
            Component::Ssd(c) => &c.part,
            Component::Hdd(c) => &c.part,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.part().name.as_deref()
    }
}

/// A storage device as counted against the motherboard's ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageDevice {
    Ssd(Ssd),
    Hdd(Hdd),
}

impl StorageDevice {
    /// SSD protocol or HDD interface.
    pub fn interface(&self) -> Option<&str> {
        match self {
            StorageDevice::Ssd(ssd) => ssd.protocol(),
            StorageDevice::Hdd(hdd) => hdd.interface(),
        }
    }

    pub fn is_sata(&self) -> bool {
        self.interface() == Some("SATA")
    }
}

/// A partial or complete selection: at most one component per category,
/// plus optional explicit lists of RAM kits and storage devices for slot and
/// port counting.
///
/// The engine only ever reads a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Build {
    #[serde(default)]
    components: BTreeMap<Category, Component>,
    #[serde(default)]
    pub ram_modules: Vec<Ram>,
    #[serde(default)]
    pub storage_devices: Vec<StorageDevice>,
}

#[derive(Deserialize)]
struct BuildRepr {
    #[serde(default)]
    components: BTreeMap<Category, Component>,
    #[serde(default)]
    ram_modules: Vec<Ram>,
    #[serde(default)]
    storage_devices: Vec<StorageDevice>,
}

/// Every slot must hold a record of its own category.
impl<'de> Deserialize<'de> for Build {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = BuildRepr::deserialize(deserializer)?;
        if let Some((slot, component)) = repr
            .components
            .iter()
            .find(|(slot, component)| component.category() != **slot)
        {
            return Err(de::Error::custom(format!(
                "{} slot holds a {} record",
                slot,
                component.category()
            )));
        }
        Ok(Build {
            components: repr.components,
            ram_modules: repr.ram_modules,
            storage_devices: repr.storage_devices,
        })
    }
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set`.
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.set(component);
        self
    }

    /// Put `component` in its category slot, returning what it replaced.
    pub fn set(&mut self, component: impl Into<Component>) -> Option<Component> {
        let component = component.into();
        self.components.insert(component.category(), component)
    }

    pub fn remove(&mut self, category: Category) -> Option<Component> {
        self.components.remove(&category)
    }

    pub fn get(&self, category: Category) -> Option<&Component> {
        self.components.get(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.components.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.components.keys().copied()
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.ram_modules.is_empty() && self.storage_devices.is_empty()
    }

    pub fn cpu(&self) -> Option<&Cpu> {
        match self.components.get(&Category::Cpu) {
            Some(Component::Cpu(c)) => Some(c),
            _ => None,
        }
    }

    pub fn motherboard(&self) -> Option<&Motherboard> {
        match self.components.get(&Category::Motherboard) {
            Some(Component::Motherboard(c)) => Some(c),
            _ => None,
        }
    }

    pub fn ram(&self) -> Option<&Ram> {
        match self.components.get(&Category::Ram) {
            Some(Component::Ram(c)) => Some(c),
            _ => None,
        }
    }

    pub fn gpu(&self) -> Option<&Gpu> {
        match self.components.get(&Category::Gpu) {
            Some(Component::Gpu(c)) => Some(c),
            _ => None,
        }
    }

    pub fn case(&self) -> Option<&Case> {
        match self.components.get(&Category::Case) {
            Some(Component::Case(c)) => Some(c),
            _ => None,
        }
    }

    pub fn psu(&self) -> Option<&Psu> {
        match self.components.get(&Category::Psu) {
            Some(Component::Psu(c)) => Some(c),
            _ => None,
        }
    }

    pub fn cpu_cooler(&self) -> Option<&CpuCooler> {
        match self.components.get(&Category::CpuCooler) {
            Some(Component::CpuCooler(c)) => Some(c),
            _ => None,
        }
    }

    pub fn ssd(&self) -> Option<&Ssd> {
        match self.components.get(&Category::Ssd) {
            Some(Component::Ssd(c)) => Some(c),
            _ => None,
        }
    }

    pub fn hdd(&self) -> Option<&Hdd> {
        match self.components.get(&Category::Hdd) {
            Some(Component::Hdd(c)) => Some(c),
            _ => None,
        }
    }

    /// RAM kits that occupy slots: the explicit list, or the selected kit.
    pub fn installed_ram(&self) -> Vec<&Ram> {
        if self.ram_modules.is_empty() {
            self.ram().into_iter().collect()
        } else {
            self.ram_modules.iter().collect()
        }
    }

    /// Storage devices that occupy ports: the explicit list, or the selected
    /// SSD and HDD.
    pub fn installed_storage(&self) -> Vec<StorageDevice> {
        if !self.storage_devices.is_empty() {
            return self.storage_devices.clone();
        }
        let mut devices = Vec::new();
        if let Some(ssd) = self.ssd() {
            devices.push(StorageDevice::Ssd(ssd.clone()));
        }
        if let Some(hdd) = self.hdd() {
            devices.push(StorageDevice::Hdd(hdd.clone()));
        }
        devices
    }
}

/// A build described by component names, as stored in build files.
///
/// ```json
/// {"cpu": "Ryzen 5 5600X", "motherboard": "B550 Tomahawk",
///  "ram_modules": ["Vengeance LPX 16GB", "Vengeance LPX 16GB"]}
/// ```
///
/// Storage names are looked up among SSDs first, then HDDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSelection {
    pub cpu: Option<String>,
    pub motherboard: Option<String>,
    pub ram: Option<String>,
    pub gpu: Option<String>,
    pub case: Option<String>,
    pub psu: Option<String>,
    #[serde(alias = "cooler")]
    pub cpu_cooler: Option<String>,
    pub ssd: Option<String>,
    pub hdd: Option<String>,
    pub ram_modules: Vec<String>,
    pub storage_devices: Vec<String>,
}

impl BuildSelection {
    pub fn from_json(json: &str) -> Result<Self, BuildGuardError> {
        serde_json::from_str(json).map_err(|e| BuildGuardError::Parse {
            file: "build selection".to_string(),
            message: e.to_string(),
        })
    }

    /// Selected names per category, in category order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &str)> {
        [
            (Category::Cpu, &self.cpu),
            (Category::Motherboard, &self.motherboard),
            (Category::Ram, &self.ram),
            (Category::Gpu, &self.gpu),
            (Category::Case, &self.case),
            (Category::Psu, &self.psu),
            (Category::CpuCooler, &self.cpu_cooler),
            (Category::Ssd, &self.ssd),
            (Category::Hdd, &self.hdd),
        ]
        .into_iter()
        .filter_map(|(category, name)| name.as_deref().map(|n| (category, n)))
    }
}

impl From<Cpu> for Component {
    fn from(c: Cpu) -> Self {
        Component::Cpu(c)
    }
}

impl From<Motherboard> for Component {
    fn from(c: Motherboard) -> Self {
        Component::Motherboard(c)
    }
}

impl From<Ram> for Component {
    fn from(c: Ram) -> Self {
        Component::Ram(c)
    }
}

impl From<Gpu> for Component {
    fn from(c: Gpu) -> Self {
        Component::Gpu(c)
    }
}

impl From<Case> for Component {
    fn from(c: Case) -> Self {
        Component::Case(c)
    }
}

impl From<Psu> for Component {
    fn from(c: Psu) -> Self {
        Component::Psu(c)
    }
}

impl From<CpuCooler> for Component {
    fn from(c: CpuCooler) -> Self {
        Component::CpuCooler(c)
    }
}

impl From<Ssd> for Component {
    fn from(c: Ssd) -> Self {
        Component::Ssd(c)
    }
}

impl From<Hdd> for Component {
    fn from(c: Hdd) -> Self {
        Component::Hdd(c)
    }
}
