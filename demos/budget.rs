use chronoline::{calendar, Timeline};

fn main() {
    let mut budget = Timeline::new();
    budget.add(calendar::month(2024, 1).unwrap(), 1000.0);
    budget.add(calendar::month(2024, 2).unwrap(), 1200.0);
    budget.add(calendar::month(2024, 3).unwrap(), 1200.0);
    budget.add(calendar::day(2024, 1, 15).unwrap(), 80.0);

    println!("raw entries:");
    for entry in &budget {
        println!("  {}  {:>8.2}", entry.period(), entry.value());
    }

    let canonical = budget.aggregate(|_, a, b| a + b).expect("sorted input");
    println!("aggregated:");
    for entry in &canonical {
        println!("  {}  {:>8.2}", entry.period(), entry.value());
    }

    let merged = canonical.merge(|a, b| a == b);
    println!("merged:");
    for entry in &merged {
        println!("  {}  {:>8.2}", entry.period(), entry.value());
    }

    let february = calendar::month(2024, 2).unwrap();
    println!("entries touching {february}:");
    for entry in budget.find_intersects(&february) {
        println!("  {}  {:>8.2}", entry.period(), entry.value());
    }
}
