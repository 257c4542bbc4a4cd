//! Consistent Hash Ring
//!
//! Maps keys onto a fixed set of peers. Each peer is placed on the ring
//! `replicas` times (virtual nodes) so that load spreads evenly and adding a
//! peer only moves roughly `1/(n+1)` of the keys.
//!
//! Routing is only consistent across the cluster when every node builds its
//! ring from the same peer names, replica count and hash function.

use std::collections::HashMap;

/// Hash used to place peers and keys on the ring.
pub type HashFn = fn(&[u8]) -> u32;

/// Default ring hash: CRC-32C of the raw bytes.
pub fn default_hash(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    // Sorted ring positions.
    keys: Vec<u32>,
    hash_map: HashMap<u32, String>,
}

impl HashRing {
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        Self {
            hash: hash.unwrap_or(default_hash),
            replicas,
            keys: Vec::new(),
            hash_map: HashMap::new(),
        }
    }

    /// Places every peer on the ring, `replicas` times each.
    pub fn add<I, S>(&mut self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for peer in peers {
            let peer = peer.as_ref();
            for i in 0..self.replicas {
                let position = (self.hash)(format!("{}{}", i, peer).as_bytes());
                self.keys.push(position);
                self.hash_map.insert(position, peer.to_string());
            }
        }
        self.keys.sort_unstable();
        self.keys.dedup();
    }

    /// Returns the peer owning `key`, or `None` when the ring is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.keys.partition_point(|&position| position < hash);
        let position = self.keys[idx % self.keys.len()];

        self.hash_map.get(&position).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }
}
