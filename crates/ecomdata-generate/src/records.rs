use chrono::NaiveDate;
use rust_decimal::Decimal;

use ecomdata_core::{ORDER_ITEMS, ORDERS, PAYMENTS, PRODUCTS, TableDef, USERS};

/// Fixed product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Electronics,
    HomeAndKitchen,
    Fashion,
    Beauty,
    Sports,
    Books,
    Toys,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Electronics,
        Category::HomeAndKitchen,
        Category::Fashion,
        Category::Beauty,
        Category::Sports,
        Category::Books,
        Category::Toys,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::HomeAndKitchen => "Home & Kitchen",
            Category::Fashion => "Fashion",
            Category::Beauty => "Beauty",
            Category::Sports => "Sports",
            Category::Books => "Books",
            Category::Toys => "Toys",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Completed,
        PaymentStatus::Pending,
        PaymentStatus::Failed,
    ];

    /// Sampling weights, index-aligned with [`PaymentStatus::ALL`].
    pub const WEIGHTS: [f64; 3] = [0.80, 0.15, 0.05];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub signup_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: u64,
    pub name: String,
    pub category: Category,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: u64,
    pub user_id: u64,
    pub order_date: NaiveDate,
    /// Zero until the order's items are known.
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub item_id: u64,
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub payment_id: u64,
    pub order_id: u64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount: Decimal,
}

/// The five record sets of one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub payments: Vec<Payment>,
}

/// A record that can be rendered as one row of its table's flat file.
pub trait TableRecord {
    const TABLE: &'static TableDef;

    /// Rendered value for `column`, or `None` if the record has no such field.
    fn field(&self, column: &str) -> Option<String>;
}

fn date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

impl TableRecord for User {
    const TABLE: &'static TableDef = &USERS;

    fn field(&self, column: &str) -> Option<String> {
        match column {
            "user_id" => Some(self.user_id.to_string()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "signup_date" => Some(date(self.signup_date)),
            _ => None,
        }
    }
}

impl TableRecord for Product {
    const TABLE: &'static TableDef = &PRODUCTS;

    fn field(&self, column: &str) -> Option<String> {
        match column {
            "product_id" => Some(self.product_id.to_string()),
            "name" => Some(self.name.clone()),
            "category" => Some(self.category.as_str().to_string()),
            "price" => Some(self.price.to_string()),
            _ => None,
        }
    }
}

impl TableRecord for Order {
    const TABLE: &'static TableDef = &ORDERS;

    fn field(&self, column: &str) -> Option<String> {
        match column {
            "order_id" => Some(self.order_id.to_string()),
            "user_id" => Some(self.user_id.to_string()),
            "order_date" => Some(date(self.order_date)),
            "total_amount" => Some(self.total_amount.to_string()),
            _ => None,
        }
    }
}

impl TableRecord for OrderItem {
    const TABLE: &'static TableDef = &ORDER_ITEMS;

    fn field(&self, column: &str) -> Option<String> {
        match column {
            "item_id" => Some(self.item_id.to_string()),
            "order_id" => Some(self.order_id.to_string()),
            "product_id" => Some(self.product_id.to_string()),
            "quantity" => Some(self.quantity.to_string()),
            _ => None,
        }
    }
}

impl TableRecord for Payment {
    const TABLE: &'static TableDef = &PAYMENTS;

    fn field(&self, column: &str) -> Option<String> {
        match column {
            "payment_id" => Some(self.payment_id.to_string()),
            "order_id" => Some(self.order_id.to_string()),
            "method" => Some(self.method.as_str().to_string()),
            "status" => Some(self.status.as_str().to_string()),
            "amount" => Some(self.amount.to_string()),
            _ => None,
        }
    }
}
