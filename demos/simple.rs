//! A simple example showing the use of a Bloom filter.
use bloomset::{BloomFilter, FilterConfig};

fn main() -> Result<(), bloomset::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = FilterConfig {
        expected_items: 128,
        ..FilterConfig::default()
    };
    let mut bf = config.build()?;

    bf.insert("foo");
    bf.insert_all(["bar", "baz"]);

    println!("foo: {}", bf.contains("foo")); // true
    println!("qux: {}", bf.contains("qux")); // false
    println!("{}", bf.stats());

    let json = bf.to_json()?;
    let restored = BloomFilter::from_json(&json)?;
    println!("restored foo: {}", restored.contains("foo")); // true

    Ok(())
}
