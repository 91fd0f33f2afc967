//! Serialization implementations for Manifest
//!
//! `workloads` and `packs` are JSON objects keyed by name; key order is kept
//! in both directions and a name may appear only once.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

use crate::config::manifest::{Manifest, Workload};
use crate::domain::{Pack, PackKind};

#[derive(Serialize, Deserialize)]
struct WorkloadBody {
    #[serde(default)]
    description: String,
    #[serde(default)]
    packs: Vec<String>,
}

#[derive(Serialize)]
struct PackEntryRef<'a> {
    kind: &'a str,
    version: &'a str,
}

#[derive(Deserialize)]
struct PackEntry {
    kind: String,
    version: String,
}

struct WorkloadsMap<'a>(&'a [Workload]);

impl Serialize for WorkloadsMap<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for workload in self.0 {
            map.serialize_entry(
                &workload.name,
                &WorkloadBody {
                    description: workload.description.clone(),
                    packs: workload.packs.clone(),
                },
            )?;
        }
        map.end()
    }
}

struct PacksMap<'a>(&'a [Pack]);

impl Serialize for PacksMap<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for pack in self.0 {
            map.serialize_entry(
                &pack.name,
                &PackEntryRef {
                    kind: pack.kind.manifest_kind(),
                    version: &pack.version,
                },
            )?;
        }
        map.end()
    }
}

/// Serialize Manifest as `{version, workloads, packs}`
pub fn serialize_manifest<S>(
    manifest: &Manifest,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut state = serializer.serialize_struct("Manifest", 3)?;
    state.serialize_field("version", &manifest.version)?;
    state.serialize_field("workloads", &WorkloadsMap(&manifest.workloads))?;
    state.serialize_field("packs", &PacksMap(&manifest.packs))?;
    state.end()
}

/// A JSON object read as a list of entries in document order; repeated keys are rejected
struct OrderedMap<T>(Vec<(String, T)>);

impl<'de, T> Deserialize<'de> for OrderedMap<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for OrderedMapVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = OrderedMap<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with unique keys")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    if entries.iter().any(|(existing, _)| *existing == key) {
                        return Err(de::Error::custom(format!("duplicate entry '{key}'")));
                    }
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Deserialize Manifest, ignoring unknown fields
pub fn deserialize_manifest<'de, D>(deserializer: D) -> std::result::Result<Manifest, D::Error>
where
    D: Deserializer<'de>,
{
    struct ManifestVisitor;

    impl<'de> Visitor<'de> for ManifestVisitor {
        type Value = Manifest;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a workload manifest")
        }

        fn visit_map<M>(self, map: M) -> std::result::Result<Manifest, M::Error>
        where
            M: MapAccess<'de>,
        {
            process_map(map)
        }
    }

    deserializer.deserialize_map(ManifestVisitor)
}

fn process_map<'de, M>(mut map: M) -> std::result::Result<Manifest, M::Error>
where
    M: MapAccess<'de>,
{
    let mut version = None;
    let mut workloads = Vec::new();
    let mut packs = Vec::new();

    while let Some(key) = map.next_key::<String>()? {
        match key.as_str() {
            "version" => version = Some(map.next_value::<String>()?),
            "workloads" => {
                let OrderedMap(entries) = map.next_value::<OrderedMap<WorkloadBody>>()?;
                workloads = entries
                    .into_iter()
                    .map(|(name, body)| Workload {
                        name,
                        description: body.description,
                        packs: body.packs,
                    })
                    .collect();
            }
            "packs" => {
                let OrderedMap(entries) = map.next_value::<OrderedMap<PackEntry>>()?;
                packs = entries
                    .into_iter()
                    .map(|(name, entry)| to_pack(name, entry))
                    .collect::<std::result::Result<_, _>>()?;
            }
            _ => {
                map.next_value::<IgnoredAny>()?;
            }
        }
    }

    let version = version.ok_or_else(|| de::Error::missing_field("version"))?;
    Ok(Manifest {
        version,
        workloads,
        packs,
    })
}

fn to_pack<E>(name: String, entry: PackEntry) -> std::result::Result<Pack, E>
where
    E: de::Error,
{
    let kind = PackKind::from_manifest_kind(&entry.kind).ok_or_else(|| {
        E::custom(format!(
            "unknown kind '{}' for pack '{name}', expected sdk, framework or template",
            entry.kind
        ))
    })?;
    Ok(Pack::new(name, kind, entry.version))
}
