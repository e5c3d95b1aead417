//! GST calculation and invoice numbering examples

use billing_core::{
    amount_in_words, financial_year_label, next_invoice_number, InvoiceTotals, LineItem, TaxRates,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Billing Core - GST Calculation Examples\n");

    // 1. Intra-state vs inter-state rates
    println!("🏢 Intra-state Sale (CGST + SGST):");
    let intra = TaxRates::intra_state(BigDecimal::from(18));
    println!(
        "  CGST {}% + SGST {}% = {}% total",
        intra.cgst,
        intra.sgst,
        intra.total_rate()
    );

    println!("\n🚚 Inter-state Sale (IGST):");
    let inter = TaxRates::inter_state(BigDecimal::from(18));
    println!("  IGST {}% = {}% total\n", inter.igst, inter.total_rate());

    // 2. Tax calculation over line items
    println!("📊 Calculating invoice totals...");
    let items = vec![
        LineItem::new(
            "Machined bracket".to_string(),
            "7326".to_string(),
            BigDecimal::from(2),
            BigDecimal::from(500),
        ),
        LineItem::new(
            "Assembly service".to_string(),
            "9988".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(1000),
        ),
    ];
    let totals = InvoiceTotals::calculate(&items, &intra, false);
    println!("  Subtotal: ₹{}", totals.subtotal);
    println!("  CGST:     ₹{}", totals.cgst_amount);
    println!("  SGST:     ₹{}", totals.sgst_amount);
    println!("  Total:    ₹{}\n", totals.total);

    // 3. Round-off to the nearest rupee
    println!("🪙 Round-off example (3 × ₹333 @ 18%):");
    let odd_items = vec![LineItem::new(
        "Fastener kit".to_string(),
        "7318".to_string(),
        BigDecimal::from(3),
        BigDecimal::from(333),
    )];
    let rounded = InvoiceTotals::calculate(&odd_items, &intra, true);
    println!("  Subtotal:  ₹{}", rounded.subtotal);
    println!("  Round off: ₹{}", rounded.round_off_amount);
    println!("  Total:     ₹{}\n", rounded.total);

    // 4. Back out the taxable value from a tax-inclusive price
    println!("🔄 Reverse calculation (₹1,180 inclusive of 18%):");
    let reversed = InvoiceTotals::reverse_calculate(BigDecimal::from(1180), &intra);
    println!("  Taxable value: ₹{}", reversed.subtotal);
    println!("  Tax:           ₹{}\n", reversed.total_tax());

    // 5. Invoice numbering per Indian financial year
    println!("🔢 Invoice numbering:");
    let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let february = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let april = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    println!("  Financial year for {}: {}", june, financial_year_label(june));

    let existing = ["001/2024-25", "002/2024-25"];
    println!(
        "  Next number in {}: {}",
        financial_year_label(february),
        next_invoice_number(existing, february)
    );
    println!(
        "  Next number in {}: {} (sequence resets)\n",
        financial_year_label(april),
        next_invoice_number(existing, april)
    );

    // 6. Amounts in words, Indian style
    println!("🗣️  Amounts in words:");
    for amount in [2360u64, 100_000, 12_345_678] {
        println!("  ₹{} → {}", amount, amount_in_words(amount));
    }

    println!("\n✨ Done!");
    Ok(())
}
