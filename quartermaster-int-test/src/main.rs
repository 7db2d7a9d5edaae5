use fake::faker::lorem::en::Word;
use fake::Fake;
use quartermaster::config::QuartermasterConfig;
use quartermaster::errors::QuartermasterResult;
use quartermaster::filter::{field, FilterSequence};
use quartermaster::inventory::AssetList;
use quartermaster::record::{AssetType, Record};

fn main() -> QuartermasterResult<()> {
    println!("Starting filter stress run...");
    let count = 200_000;

    let start = std::time::Instant::now();
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let name: String = Word().fake();
        let quantity: i64 = (0..100).fake();
        let weight: f64 = (0.0..50.0).fake();

        let mut record = Record::new();
        record.put("quantity", quantity)?;
        record.put("model.name", name)?;
        record.put("model.weight", weight)?;
        record.put("model.stackable", quantity % 2 == 0)?;
        records.push(record);
    }
    let items = AssetList::new(AssetType::Item, records);
    println!("Generated {} items in {:?}", items.len(), start.elapsed());

    let start = std::time::Instant::now();
    let matched = items.filter(&FilterSequence::new()).len();
    println!("Empty filter matched {} items in {:?}", matched, start.elapsed());

    let filter = field("quantity")
        .gt(50)
        .or(field("model.name").contains("et"))
        .and(field("model.stackable").eq(true));

    let start = std::time::Instant::now();
    let matched = items.filter(&filter).len();
    println!("{} matched {} items in {:?}", filter, matched, start.elapsed());

    let config = QuartermasterConfig::builder().page_size(50).build()?;
    let start = std::time::Instant::now();
    let page = items.search(&filter, 3, &config)?;
    println!(
        "Page {} of {} with {} items in {:?}",
        page.number + 1,
        page.total_pages,
        page.len(),
        start.elapsed()
    );

    Ok(())
}
