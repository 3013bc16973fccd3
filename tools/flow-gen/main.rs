use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate random recipe flow documents for the mise pipeline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of parallel blocks hanging off the ingredients node
    #[arg(short, long, default_value_t = 3)]
    blocks: usize,

    /// The minimum number of steps after each block head
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of steps after each block head
    #[arg(long, default_value_t = 4)]
    max: usize,

    /// Number of steps after the merge point
    #[arg(short, long, default_value_t = 2)]
    tail: usize,
}

const INGREDIENTS: [&str; 8] = [
    "flour", "butter", "eggs", "sugar", "milk", "onion", "garlic", "tomato",
];
const STEP_KINDS: [&str; 2] = ["preparationNode", "cookingNode"];
const VERBS: [&str; 6] = ["Chop", "Whisk", "Simmer", "Knead", "Rest", "Fry"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    println!(
        "Generating flow with {} block(s), {} to {} steps each, {} tail step(s)...",
        cli.blocks, cli.min, cli.max, cli.tail
    );

    let document = generate_flow(&mut rng, &cli);
    let json_output = serde_json::to_string_pretty(&document)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved flow to '{}'", cli.output);
    Ok(())
}

fn generate_flow(rng: &mut ThreadRng, cli: &Cli) -> Value {
    let mut nodes = vec![ingredients_node(rng)];
    let mut edges = Vec::new();
    let mut edge_id = 0usize;
    let mut link = |source: &str, target: &str, rng: &mut ThreadRng| {
        edge_id += 1;
        let mut edge = json!({ "id": format!("e{}", edge_id), "source": source, "target": target });
        if rng.random_bool(0.3) {
            edge["time"] = json!(format!("{} min", rng.random_range(5..60)));
        }
        edge
    };

    let merge_id = "merge".to_string();
    for block in 0..cli.blocks {
        let head = format!("block{}", block + 1);
        nodes.push(step_node(&head, "blockNode", &format!("Block {}", block + 1)));
        edges.push(link("ingredients", &head, rng));

        let mut previous = head;
        for step in 0..rng.random_range(cli.min..=cli.max) {
            let id = format!("b{}s{}", block + 1, step + 1);
            let kind = STEP_KINDS[rng.random_range(0..STEP_KINDS.len())];
            let verb = VERBS[rng.random_range(0..VERBS.len())];
            nodes.push(step_node(&id, kind, verb));
            edges.push(link(&previous, &id, rng));
            previous = id;
        }
        if cli.blocks > 1 {
            edges.push(link(&previous, &merge_id, rng));
        }
    }

    if cli.blocks > 1 {
        nodes.push(step_node(&merge_id, "cookingNode", "Combine"));
        let mut previous = merge_id;
        for step in 0..cli.tail {
            let id = format!("tail{}", step + 1);
            let kind = if step + 1 == cli.tail {
                "servingNode"
            } else {
                "cookingNode"
            };
            nodes.push(step_node(&id, kind, "Finish"));
            edges.push(link(&previous, &id, rng));
            previous = id;
        }
    }

    println!("-> Generated {} nodes and {} edges.", nodes.len(), edges.len());
    json!({ "nodes": nodes, "edges": edges })
}

fn ingredients_node(rng: &mut ThreadRng) -> Value {
    let mut ingredients = Vec::new();
    for name in INGREDIENTS {
        if rng.random_bool(0.6) {
            let quantity = format!("{} g", rng.random_range(10..500));
            ingredients.push(json!({ "name": name, "quantity": quantity }));
        }
    }
    json!({
        "id": "ingredients",
        "type": "ingredientNode",
        "position": { "x": 0, "y": 0 },
        "data": { "label": "Ingredients", "ingredients": ingredients }
    })
}

fn step_node(id: &str, kind: &str, label: &str) -> Value {
    json!({
        "id": id,
        "type": kind,
        "position": { "x": 0, "y": 0 },
        "data": { "label": label, "description": format!("{} ({})", label, id) }
    })
}
