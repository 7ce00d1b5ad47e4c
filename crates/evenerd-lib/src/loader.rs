//! Ingestion of the `mapDenormalize.csv` / `mapJumps.csv` static data exports.
//!
//! Rows are classified by id range: systems, celestials, stargates and
//! stations. Everything else (regions, constellations, asteroid belts outside
//! those ranges) is ignored. Systems are registered in a first pass so that
//! bodies may appear before their system in the file.

use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::universe::{BodyId, BodyKind, Position, SystemId, Universe};

const SYSTEM_IDS: Range<i64> = 30_000_000..40_000_000;
const CELESTIAL_IDS: Range<i64> = 40_000_000..50_000_000;
const STARGATE_IDS: Range<i64> = 50_000_000..60_000_000;
const STATION_IDS: Range<i64> = 60_000_000..70_000_000;

/// Regions left out of the graph (unreachable or special-purpose space).
const EXCLUDED_REGIONS: [i64; 3] = [10_000_004, 10_000_017, 10_000_019];

#[derive(Debug, Deserialize)]
struct DenormalizeRow {
    #[serde(rename = "itemID")]
    item_id: i64,
    #[serde(rename = "groupID", default, deserialize_with = "csv::invalid_option")]
    group_id: Option<i64>,
    #[serde(
        rename = "solarSystemID",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    solar_system_id: Option<SystemId>,
    #[serde(rename = "regionID", default, deserialize_with = "csv::invalid_option")]
    region_id: Option<i64>,
    x: f64,
    y: f64,
    z: f64,
    #[serde(rename = "itemName")]
    item_name: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    security: Option<f64>,
}

impl DenormalizeRow {
    fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    fn is_excluded(&self) -> bool {
        self.region_id
            .is_some_and(|region| EXCLUDED_REGIONS.contains(&region))
    }

    fn body_kind(&self) -> Option<BodyKind> {
        let id = self.item_id;
        if CELESTIAL_IDS.contains(&id) {
            Some(BodyKind::Celestial)
        } else if STARGATE_IDS.contains(&id) {
            Some(BodyKind::Stargate)
        } else if STATION_IDS.contains(&id) {
            Some(BodyKind::Station)
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct JumpRow {
    #[serde(rename = "stargateID")]
    stargate_id: BodyId,
    #[serde(rename = "destinationID")]
    destination_id: BodyId,
}

/// Load a universe from the two CSV exports on disk.
pub fn load_universe(denormalize: &Path, jumps: &Path) -> Result<Universe> {
    debug!(
        denormalize = %denormalize.display(),
        jumps = %jumps.display(),
        "loading universe"
    );
    load_universe_from_readers(File::open(denormalize)?, File::open(jumps)?)
}

/// Load a universe from any pair of readers yielding the CSV exports.
pub fn load_universe_from_readers<D: Read, J: Read>(denormalize: D, jumps: J) -> Result<Universe> {
    let rows = read_denormalize(denormalize)?;
    let mut universe = Universe::new();

    for (_, row) in rows
        .iter()
        .filter(|(_, row)| SYSTEM_IDS.contains(&row.item_id))
    {
        universe.add_system(
            row.item_id,
            row.item_name.as_str(),
            row.position(),
            row.security.unwrap_or(0.0),
        );
    }

    let mut skipped = 0usize;
    for (line, row) in &rows {
        let Some(kind) = row.body_kind() else {
            continue;
        };
        let system_id = row.solar_system_id.ok_or_else(|| Error::InvalidDataset {
            line: *line,
            message: format!("body {} has no solar system", row.item_id),
        })?;
        if universe.system_by_id(system_id).is_none() {
            skipped += 1;
            continue;
        }

        universe
            .add_body(
                system_id,
                row.item_id,
                kind,
                row.item_name.as_str(),
                row.position(),
            )
            .map_err(|error| match error {
                Error::DuplicateBody { id } => Error::InvalidDataset {
                    line: *line,
                    message: format!("duplicate body id {id}"),
                },
                other => other,
            })?;
        if let Some(group_id) = row.group_id {
            universe.set_group(row.item_id, group_id)?;
        }
    }
    if skipped > 0 {
        debug!(skipped, "skipped bodies outside loaded systems");
    }

    let linked = link_stargates(&mut universe, jumps)?;

    info!(
        systems = universe.system_count(),
        bodies = universe.body_count(),
        stargates = linked,
        "loaded universe"
    );
    Ok(universe)
}

fn read_denormalize<R: Read>(reader: R) -> Result<Vec<(u64, DenormalizeRow)>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = StringRecord::new();
    let mut rows = Vec::new();

    while csv_reader.read_record(&mut record)? {
        let line = record_line(&record);
        let row: DenormalizeRow =
            record
                .deserialize(Some(&headers))
                .map_err(|err| Error::InvalidDataset {
                    line,
                    message: err.to_string(),
                })?;
        if !row.is_excluded() {
            rows.push((line, row));
        }
    }

    Ok(rows)
}

fn link_stargates<R: Read>(universe: &mut Universe, reader: R) -> Result<usize> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = StringRecord::new();
    let mut linked = 0usize;

    while csv_reader.read_record(&mut record)? {
        let row: JumpRow =
            record
                .deserialize(Some(&headers))
                .map_err(|err| Error::InvalidDataset {
                    line: record_line(&record),
                    message: err.to_string(),
                })?;

        let (Some(from), Some(to)) = (
            stargate(universe, row.stargate_id),
            stargate(universe, row.destination_id),
        ) else {
            warn!(
                stargate = row.stargate_id,
                destination = row.destination_id,
                "skipping link between unknown stargates"
            );
            continue;
        };

        let name = format!(
            "{} - {} gate",
            universe.system_of(from).name,
            universe.system_of(to).name
        );
        universe.link_stargate(row.stargate_id, row.destination_id)?;
        universe.rename_body(row.stargate_id, name)?;
        linked += 1;
    }

    Ok(linked)
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |position| position.line())
}

fn stargate(universe: &Universe, id: BodyId) -> Option<usize> {
    universe
        .body_by_id(id)
        .filter(|body| body.kind == BodyKind::Stargate)
        .map(|body| body.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "itemID,typeID,groupID,solarSystemID,constellationID,regionID,orbitID,x,y,z,radius,itemName,security,celestialIndex,orbitIndex\n";

    fn denormalize(rows: &str) -> String {
        format!("{HEADER}{rows}")
    }

    #[test]
    fn classifies_rows_by_id_range() {
        let data = denormalize(concat!(
            "10000002,3,3,None,None,None,None,0,0,0,None,The Forge,None,None,None\n",
            "30000142,5,5,30000142,20000020,10000002,None,1,2,3,None,Jita,0.946,None,None\n",
            "40009077,6,6,30000142,20000020,10000002,None,0,0,0,1000,Jita - Star,0.946,None,None\n",
            "50001248,29624,10,30000142,20000020,10000002,None,5,5,5,None,Stargate (Perimeter),0.946,None,None\n",
            "60003760,52678,15,30000142,20000020,10000002,40009087,9,9,9,None,Jita IV - Moon 4 - Caldari Navy Assembly Plant,0.946,None,None\n",
        ));
        let universe =
            load_universe_from_readers(data.as_bytes(), "stargateID,destinationID\n".as_bytes())
                .unwrap();

        assert_eq!(universe.system_count(), 1);
        assert_eq!(universe.body_count(), 3);
        let jita = universe.system_by_id(30000142).unwrap();
        assert_eq!(jita.name, "Jita");
        assert!((jita.security - 0.946).abs() < 1e-12);
        assert_eq!(universe.body_by_id(40009077).unwrap().group_id, Some(6));
        assert_eq!(
            universe.body_by_id(60003760).unwrap().kind,
            BodyKind::Station
        );
    }

    #[test]
    fn excluded_regions_are_skipped() {
        let data = denormalize(concat!(
            "30000001,5,5,30000001,20000001,10000001,None,0,0,0,None,Tanoo,0.858,None,None\n",
            "31000005,5,5,31000005,21000001,10000019,None,0,0,0,None,Thera,-0.99,None,None\n",
            "40000002,6,6,31000005,21000001,10000019,None,0,0,0,None,Thera - Star,-0.99,None,None\n",
        ));
        let universe =
            load_universe_from_readers(data.as_bytes(), "stargateID,destinationID\n".as_bytes())
                .unwrap();

        assert_eq!(universe.system_count(), 1);
        assert_eq!(universe.body_count(), 0);
    }

    #[test]
    fn links_and_renames_stargates() {
        let data = denormalize(concat!(
            "30000001,5,5,30000001,20000001,10000001,None,0,0,0,None,Tanoo,0.858,None,None\n",
            "30000003,5,5,30000003,20000001,10000001,None,1,0,0,None,Akpivem,0.846,None,None\n",
            "50000056,16,10,30000001,20000001,10000001,None,0,0,0,None,Stargate (Akpivem),0.858,None,None\n",
            "50000057,16,10,30000003,20000001,10000001,None,1,0,0,None,Stargate (Tanoo),0.846,None,None\n",
        ));
        let jumps = "stargateID,destinationID\n50000056,50000057\n50000057,50000056\n50000056,59999999\n";
        let universe = load_universe_from_readers(data.as_bytes(), jumps.as_bytes()).unwrap();

        let gate = universe.body_by_id(50000056).unwrap();
        assert_eq!(gate.name, "Tanoo - Akpivem gate");
        assert_eq!(gate.stargate, Some(universe.body_index(50000057).unwrap()));
        assert_eq!(
            universe.body_by_id(50000057).unwrap().name,
            "Akpivem - Tanoo gate"
        );
    }

    #[test]
    fn malformed_rows_report_dataset_errors() {
        let data = denormalize(
            "30000001,5,5,30000001,20000001,10000001,None,not-a-number,0,0,None,Tanoo,0.858,None,None\n",
        );
        let error =
            load_universe_from_readers(data.as_bytes(), "stargateID,destinationID\n".as_bytes())
                .expect_err("bad coordinate");
        assert!(matches!(error, Error::InvalidDataset { line: 2, .. }));
    }

    #[test]
    fn body_without_system_is_rejected() {
        let data = denormalize(
            "40000002,6,6,None,20000001,10000001,None,0,0,0,None,Orphan,None,None,None\n",
        );
        let error =
            load_universe_from_readers(data.as_bytes(), "stargateID,destinationID\n".as_bytes())
                .expect_err("orphan body");
        assert!(matches!(error, Error::InvalidDataset { line: 2, .. }));
    }

    #[test]
    fn duplicate_body_rows_are_rejected() {
        let data = denormalize(concat!(
            "30000001,5,5,30000001,20000001,10000001,None,0,0,0,None,Tanoo,0.858,None,None\n",
            "40000002,6,6,30000001,20000001,10000001,None,0,0,0,None,Tanoo - Star,0.858,None,None\n",
            "40000002,7,7,30000001,20000001,10000001,None,1,0,0,None,Tanoo I,0.858,None,None\n",
        ));
        let error =
            load_universe_from_readers(data.as_bytes(), "stargateID,destinationID\n".as_bytes())
                .expect_err("duplicate body");
        assert!(matches!(error, Error::InvalidDataset { line: 4, .. }));
    }
}
