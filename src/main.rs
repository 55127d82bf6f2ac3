//! Hexstead - Settlement Demo
//!
//! Generates a seeded hex map, founds a settlement on it, runs a number of
//! turns and reports the buildings, resources and building meshes.

use std::path::PathBuf;

use ahash::AHashMap;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use hexstead::city::{
    can_upgrade, BuildingId, BuildingType, HexData, Level, PlacementRejection, ResourcePool,
    Settlement,
};
use hexstead::core::config::{config, set_config};
use hexstead::core::error::{HexsteadError, Result};
use hexstead::core::types::{ResourceType, Terrain};
use hexstead::core::RenderConfig;
use hexstead::renderer::{create_mesh, update_mesh, SceneNode};
use hexstead::spatial::HexCoord;

/// Hexstead - run a seeded settlement for a number of turns
#[derive(Parser, Debug)]
#[command(name = "hexstead")]
#[command(about = "Found a settlement on a generated hex map and advance it turn by turn")]
struct Args {
    /// Number of turns to advance
    #[arg(long, default_value_t = 12)]
    turns: u32,

    /// Random seed for the terrain map
    #[arg(long)]
    seed: Option<u64>,

    /// Map radius in hexes around the settlement center
    #[arg(long, default_value_t = 3)]
    radius: u32,

    /// Render config TOML (defaults are used if missing or invalid)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

/// Buildings the demo tries to found, in order
const BUILD_ORDER: [BuildingType; 6] = [
    BuildingType::TownCenter,
    BuildingType::Farm,
    BuildingType::LumberMill,
    BuildingType::Quarry,
    BuildingType::Mine,
    BuildingType::MageTower,
];

/// Per-building mesh summary for the report
#[derive(Serialize)]
struct MeshSummary {
    building_type: BuildingType,
    coord: HexCoord,
    level: Level,
    turns_remaining: u32,
    height: f32,
    opacity: f32,
    /// Material color as #rrggbb
    color: String,
    triangles: usize,
    /// Vertex and index buffer size
    upload_bytes: usize,
}

#[derive(Serialize)]
struct DemoReport<'a> {
    seed: u64,
    turns: u32,
    settlement: &'a Settlement,
    meshes: Vec<MeshSummary>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hexstead=info")),
        )
        .init();

    if let Some(path) = &args.config {
        if let Err(e) = set_config(RenderConfig::load_or_default(path)) {
            tracing::warn!("Keeping current render config: {}", e);
        }
    }

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut map = generate_map(&mut rng, args.radius);
    tracing::info!("Generated {} hexes (seed {})", map.len(), seed);

    let mut settlement = Settlement::with_resources(
        ResourcePool::new()
            .with(ResourceType::Food, 100)
            .with(ResourceType::Wood, 120)
            .with(ResourceType::Stone, 60)
            .with(ResourceType::Gold, 60)
            .with(ResourceType::Mana, 10),
    );

    let mut meshes: AHashMap<BuildingId, SceneNode> = AHashMap::new();
    for building_type in BUILD_ORDER {
        match found_building(&mut settlement, &mut map, building_type)? {
            Some(id) => {
                if let Some(building) = settlement.get(id) {
                    meshes.insert(
                        id,
                        create_mesh(
                            building_type,
                            building.coord,
                            building.turns_remaining,
                            building.level,
                        ),
                    );
                }
            }
            None => tracing::info!("No site for {}", building_type),
        }
    }

    let text = args.format != "json";
    for _ in 0..args.turns {
        let report = settlement.advance_turn();

        // Spend surplus on upgrades in founding order
        let ready: Vec<BuildingId> = settlement
            .buildings
            .iter()
            .filter(|b| can_upgrade(b, &settlement.resources).is_ok())
            .map(|b| b.id)
            .collect();
        for id in ready {
            if settlement.upgrade_building(id).is_ok() {
                if let Some(building) = settlement.get(id) {
                    meshes.insert(
                        id,
                        create_mesh(building.building_type, building.coord, 0, building.level),
                    );
                }
            }
        }

        for building in &settlement.buildings {
            if let Some(node) = meshes.get_mut(&building.id) {
                update_mesh(node, building.building_type, building.turns_remaining);
            }
        }

        if text {
            let produced: Vec<String> = report
                .produced
                .iter()
                .map(|(res, amount)| format!("{} +{}", res, amount))
                .collect();
            println!(
                "Turn {:>3}: {} completed, produced [{}], population cap {}",
                report.turn,
                report.completed.len(),
                produced.join(", "),
                settlement.population.cap
            );
        }
    }

    let summaries: Vec<MeshSummary> = settlement
        .buildings
        .iter()
        .filter_map(|b| {
            meshes.get(&b.id).map(|node| {
                let data = node.geometry.tessellate();
                MeshSummary {
                    building_type: b.building_type,
                    coord: b.coord,
                    level: b.level,
                    turns_remaining: b.turns_remaining,
                    height: node.rendered_height(),
                    opacity: node.material.opacity,
                    color: format!("#{:06x}", node.material.color.to_hex()),
                    triangles: data.triangle_count(),
                    upload_bytes: data.vertex_bytes().len() + data.index_bytes().len(),
                }
            })
        })
        .collect();

    match args.format.as_str() {
        "json" => {
            let report = DemoReport {
                seed,
                turns: settlement.turn,
                settlement: &settlement,
                meshes: summaries,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        other => {
            if other != "text" {
                eprintln!("Unknown format '{}', defaulting to text", other);
            }
            print_summary(&settlement, &summaries, seed);
        }
    }

    Ok(())
}

/// Seeded terrain for every hex within `radius` of the origin; the center is plains
fn generate_map(rng: &mut ChaCha8Rng, radius: u32) -> AHashMap<HexCoord, HexData> {
    let origin = HexCoord::new(0, 0);
    origin
        .hexes_in_range(radius)
        .into_iter()
        .map(|coord| {
            let terrain = if coord == origin {
                Terrain::Plains
            } else {
                match rng.gen_range(0..100) {
                    0..=44 => Terrain::Plains,
                    45..=64 => Terrain::Forest,
                    65..=79 => Terrain::Mountain,
                    80..=89 => Terrain::Desert,
                    _ => Terrain::Water,
                }
            };
            (coord, HexData::empty(terrain))
        })
        .collect()
}

/// Place a building next to the settlement, as close to the origin as possible
///
/// The first building goes on the origin. Later ones must touch an existing
/// building. Returns `Ok(None)` when no such hex accepts it or it cannot be
/// afforded.
fn found_building(
    settlement: &mut Settlement,
    map: &mut AHashMap<HexCoord, HexData>,
    building_type: BuildingType,
) -> Result<Option<BuildingId>> {
    let origin = HexCoord::new(0, 0);
    let mut sites: Vec<HexCoord> = if settlement.buildings.is_empty() {
        vec![origin]
    } else {
        settlement
            .buildings
            .iter()
            .flat_map(|b| b.coord.neighbors())
            .filter(|c| map.contains_key(c))
            .collect()
    };
    sites.sort_by_key(|c| (c.distance(&origin), c.q, c.r));
    sites.dedup();

    for coord in sites {
        let Some(hex) = map.get_mut(&coord) else {
            continue;
        };
        match settlement.place_building(building_type, coord, hex) {
            Ok(id) => {
                hex.building = Some(id);
                tracing::info!("Founded {} at ({}, {})", building_type, coord.q, coord.r);
                return Ok(Some(id));
            }
            Err(HexsteadError::Placement(PlacementRejection::InsufficientResource(res))) => {
                tracing::info!("Cannot afford {}: not enough {}", building_type, res);
                return Ok(None);
            }
            Err(HexsteadError::Placement(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(None)
}

fn print_summary(settlement: &Settlement, meshes: &[MeshSummary], seed: u64) {
    let render = config();

    println!();
    println!("=== HEXSTEAD (seed {}) ===", seed);
    println!("Turn: {}", settlement.turn);
    println!(
        "Population cap: {} (ground offset {:.2})",
        settlement.population.cap, render.ground_offset
    );
    println!();
    println!("Resources:");
    for res in ResourceType::ALL {
        println!("  {:<6} {}", res, settlement.resources.get(res));
    }
    println!();
    println!("Buildings:");
    for mesh in meshes {
        let status = if mesh.turns_remaining > 0 {
            format!("{} turns left", mesh.turns_remaining)
        } else {
            "complete".to_string()
        };
        println!(
            "  {:<12} ({:>2}, {:>2}) L{} {:<14} {} height {:.2} opacity {:.2} tris {} ({} bytes)",
            mesh.building_type.to_string(),
            mesh.coord.q,
            mesh.coord.r,
            mesh.level,
            status,
            mesh.color,
            mesh.height,
            mesh.opacity,
            mesh.triangles,
            mesh.upload_bytes
        );
    }
}
