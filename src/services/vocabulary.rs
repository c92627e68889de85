//! Static ERP vocabulary used to train the fuzzy spell-correction index.
//!
//! Consumed once at startup; duplicates are harmless and order is
//! irrelevant. There is no persisted format and no runtime learning.

/// Domain terms the spell corrector recognizes.
pub const ERP_VOCABULARY: &[&str] = &[
    // Core ERP
    "invoice",
    "invoices",
    "purchase",
    "order",
    "orders",
    "vendor",
    "vendors",
    "customer",
    "customers",
    "supplier",
    "suppliers",
    "payment",
    "payments",
    "receipt",
    "receipts",
    "quotation",
    "quotations",
    "billing",
    "estimate",
    // HR
    "attendance",
    "leave",
    "leaves",
    "salary",
    "payroll",
    "employee",
    "employees",
    "timesheet",
    "timesheets",
    "overtime",
    "shift",
    "shifts",
    // Inventory
    "inventory",
    "stock",
    "product",
    "products",
    "warehouse",
    "dispatch",
    "goods",
    "delivery",
    // Accounting
    "ledger",
    "journal",
    "account",
    "accounts",
    "balance",
    "debit",
    "credit",
    "expense",
    "expenses",
    "asset",
    "assets",
    // Workflow
    "approval",
    "approvals",
    "workflow",
    "pending",
    "approved",
    "rejected",
    "submitted",
    // Reporting
    "report",
    "reports",
    "dashboard",
    "analytics",
    "summary",
    "finance",
    "procurement",
    // Actions
    "create",
    "creating",
    "make",
    "add",
    "adding",
    "delete",
    "deleting",
    "edit",
    "editing",
    "update",
    "updating",
    "view",
    "viewing",
    "search",
    "searching",
    "approve",
    "approving",
    "reject",
    "rejecting",
    "submit",
    "export",
    "print",
    "download",
    // Question words
    "how",
    "what",
    "where",
    "when",
    "which",
    "help",
    "need",
    "want",
    "show",
    "find",
];
