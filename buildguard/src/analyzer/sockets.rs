//! Socket family partitioning for cooler socket lists.
//!
//! Intel sockets are recorded either as bare numbers (`1700`) or with an
//! `LGA` prefix. AMD sockets carry `AM`, `FM`, `TR4` or `sTRX4`. Anything
//! else cannot be placed and is counted in both families.

use serde::{Deserialize, Serialize};

const AMD_MARKERS: [&str; 4] = ["AM", "FM", "TR4", "STRX4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketFamily {
    Intel,
    Amd,
}

impl SocketFamily {
    /// Map a CPU producer string to a family.
    pub fn from_producer(producer: &str) -> Option<Self> {
        match producer.trim().to_ascii_lowercase().as_str() {
            "intel" => Some(SocketFamily::Intel),
            "amd" => Some(SocketFamily::Amd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketClass {
    Intel,
    Amd,
    /// Neither rule matched; belongs to both families.
    Ambiguous,
}

impl SocketClass {
    pub fn belongs_to(self, family: SocketFamily) -> bool {
        match self {
            SocketClass::Intel => family == SocketFamily::Intel,
            SocketClass::Amd => family == SocketFamily::Amd,
            SocketClass::Ambiguous => true,
        }
    }
}

pub fn classify_socket(socket: &str) -> SocketClass {
    let numeric = !socket.is_empty() && socket.chars().all(|c| c.is_ascii_digit());
    if numeric || socket.starts_with("LGA") {
        return SocketClass::Intel;
    }
    let upper = socket.to_uppercase();
    if AMD_MARKERS.iter().any(|marker| upper.contains(marker)) {
        SocketClass::Amd
    } else {
        SocketClass::Ambiguous
    }
}

/// A socket list split into Intel and AMD partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketFamilies {
    pub intel: Vec<String>,
    pub amd: Vec<String>,
}

impl SocketFamilies {
    pub fn partition<S: AsRef<str>>(sockets: &[S]) -> Self {
        let mut families = Self::default();
        for socket in sockets {
            let socket = socket.as_ref();
            let class = classify_socket(socket);
            if class.belongs_to(SocketFamily::Intel) {
                families.intel.push(socket.to_string());
            }
            if class.belongs_to(SocketFamily::Amd) {
                families.amd.push(socket.to_string());
            }
        }
        families
    }

    pub fn supports(&self, family: SocketFamily) -> bool {
        match family {
            SocketFamily::Intel => !self.intel.is_empty(),
            SocketFamily::Amd => !self.amd.is_empty(),
        }
    }

    /// Fits both Intel and AMD boards.
    pub fn is_universal(&self) -> bool {
        !self.intel.is_empty() && !self.amd.is_empty()
    }
}
