use rust_decimal::Decimal;

/// Decimal places kept for money amounts
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Largest debit/credit difference still treated as balanced (0.005)
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// Useful life used when an asset has neither its own life nor a depreciation class
pub const DEFAULT_USEFUL_LIFE_MONTHS: u32 = 48;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Largest money amount accepted on input (10^18); keeps report and ledger sums
/// far from `Decimal::MAX`
pub const MAX_MONEY: Decimal = Decimal::from_parts(2_808_348_672, 232_830_643, 0, false, 0);

/// Longest useful life accepted for an asset (100 years)
pub const MAX_USEFUL_LIFE_MONTHS: u32 = 1200;

/// Months a schedule may run past the end of the useful life
pub const SCHEDULE_TAIL_MONTHS: u32 = 12;
