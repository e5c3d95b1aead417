//! Basic billing workflow example

use billing_core::utils::MemoryStorage;
use billing_core::{
    Billing, ClientDetails, CompanyProfile, InvoiceDraft, LineItem, PaymentInput, PaymentMethod,
    TaxRates,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Billing Core - Basic Billing Example\n");

    // Create a billing engine with in-memory storage
    let storage = MemoryStorage::new();
    let mut billing = Billing::new(storage);

    // 1. Register a client
    println!("👤 Registering a client...");
    let client = billing
        .create_client(ClientDetails {
            name: "Sharma Industries".to_string(),
            gstin: Some("27AABCS1234A1ZQ".to_string()),
            address: Some("Plot 14, MIDC Industrial Area".to_string()),
            city: Some("Mumbai".to_string()),
            state: Some("Maharashtra".to_string()),
            ..ClientDetails::default()
        })
        .await?;
    println!("  ✓ Created client: {}\n", client.name);

    // 2. Build a small product catalog
    println!("📦 Building the product catalog...");
    let bracket = billing
        .create_product(
            "Machined bracket".to_string(),
            "7326".to_string(),
            BigDecimal::from(500),
        )
        .await?;
    let assembly = billing
        .create_product(
            "Assembly service".to_string(),
            "9988".to_string(),
            BigDecimal::from(1000),
        )
        .await?;
    println!("  ✓ Created products: {}, {}\n", bracket.name, assembly.name);

    // 3. Issue an invoice from catalog products
    println!("📄 Issuing an invoice...");
    let items = vec![
        bracket.to_line_item(BigDecimal::from(2)),
        assembly.to_line_item(BigDecimal::from(1)),
    ];
    let rates = TaxRates::intra_state(BigDecimal::from(18));

    let mut draft = InvoiceDraft::new(
        client.id.clone(),
        items,
        rates,
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    );
    draft.due_date = Some(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());

    let invoice = billing.create_invoice(draft).await?;
    println!("  ✓ Invoice {} issued", invoice.invoice_number);
    println!("    Subtotal: ₹{}", invoice.totals.subtotal);
    println!("    CGST:     ₹{}", invoice.totals.cgst_amount);
    println!("    SGST:     ₹{}", invoice.totals.sgst_amount);
    println!("    Total:    ₹{}\n", invoice.totals.total);

    // 4. Record a partial payment, then settle the balance
    println!("💰 Recording payments...");
    let (_, after_partial) = billing
        .record_payment(PaymentInput {
            invoice_id: invoice.id.clone(),
            amount: BigDecimal::from(1000),
            method: PaymentMethod::Upi,
            transaction_id: Some("UPI-2024-9981".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            notes: None,
        })
        .await?;
    println!(
        "  ✓ Partial payment of ₹1,000 recorded (status: {:?}, balance: ₹{})",
        after_partial.status,
        after_partial.balance_due()
    );

    let balance = after_partial.balance_due();
    let (_, settled) = billing
        .record_payment(PaymentInput {
            invoice_id: invoice.id.clone(),
            amount: balance,
            method: PaymentMethod::BankTransfer,
            transaction_id: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            notes: Some("NEFT settlement".to_string()),
        })
        .await?;
    println!("  ✓ Balance settled (status: {:?})\n", settled.status);

    // 5. Reconcile and summarize
    println!("🔍 Reconciling payments...");
    let reconciliation = billing.reconcile_payments(&invoice.id).await?;
    println!(
        "  ✓ Invoice {}: recorded ₹{}, payments ₹{}, consistent: {}\n",
        reconciliation.invoice_number,
        reconciliation.recorded_paid_amount,
        reconciliation.payments_total,
        reconciliation.is_consistent
    );

    println!("📈 Dashboard summary...");
    let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
    let summary = billing.dashboard_summary(today).await?;
    println!("  Invoices:  {}", summary.invoice_count);
    println!("  Billed:    ₹{}", summary.total_billed);
    println!("  Collected: ₹{}", summary.total_collected);
    println!("  Rate:      {}%\n", summary.payment_rate);

    // 6. Render the invoice document
    println!("🖨️  Rendering the invoice...\n");
    let company = CompanyProfile {
        name: "Acme Fabrication".to_string(),
        gstin: Some("27AAPFU0939F1ZV".to_string()),
        address: Some("Unit 7, Industrial Estate".to_string()),
        city: Some("Pune".to_string()),
        state: Some("Maharashtra".to_string()),
        ..CompanyProfile::default()
    };
    let document = billing.invoice_document(&invoice.id, &company).await?;
    println!("{}", document);

    println!("✨ Done!");
    Ok(())
}
