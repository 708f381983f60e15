use anchor_lang::prelude::*;

#[error_code]
pub enum LottoError {
    // Configuration and access
    #[msg("Account has already been initialized.")]
    AlreadyInitialized,

    #[msg("Only the configured admin can perform this action.")]
    Unauthorized,

    #[msg("Configuration still has open lottery instances.")]
    LotteriesOutstanding,

    // Lottery creation
    #[msg("Ticket code range start is greater than its end.")]
    InvalidRange,

    #[msg("Platform fee must be between 0 and 100 percent.")]
    InvalidFee,

    #[msg("Ticket price must be greater than zero.")]
    InvalidPrice,

    #[msg("Lottery seed exceeds 32 bytes.")]
    SeedTooLong,

    #[msg("Lottery seed is empty.")]
    EmptySeed,

    // Lifecycle
    #[msg("Lottery is not accepting ticket bundles.")]
    LotterySalesClosed,

    #[msg("Operation is not valid in the lottery's current state.")]
    InvalidState,

    #[msg("Lottery pot has not been fully disbursed.")]
    NonZeroPot,

    #[msg("Lottery still has ticket bundle accounts open.")]
    BundlesOutstanding,

    // Ticket bundles
    #[msg("Ticket code is outside the lottery's code range.")]
    CodeOutOfRange,

    #[msg("Ticket code is not a valid hex number of at most 16 digits.")]
    InvalidCode,

    #[msg("A bundle already exists for this funding transaction.")]
    DuplicateBundle,

    #[msg("Bundle holds no ticket codes.")]
    EmptyBundle,

    #[msg("Bundle exceeds the maximum of 100 ticket codes.")]
    BundleFull,

    #[msg("Lottery escrow has not received enough lamports for this bundle.")]
    Underfunded,

    #[msg("Bundle has not been settled.")]
    BundleNotSettled,

    #[msg("Bundle does not belong to this lottery.")]
    KeyMismatch,

    #[msg("Owner account does not match the bundle owner.")]
    OwnerMismatch,

    #[msg("Supplied bundles do not match the lottery's unsettled bundle count.")]
    BundleCountMismatch,

    #[msg("The same account was supplied more than once.")]
    DuplicateAccount,

    #[msg("Account must be passed as writable.")]
    AccountNotWritable,

    // Draw
    #[msg("Claimed winning code does not match the oracle-derived code.")]
    OracleMismatch,

    #[msg("Bundle does not hold the winning code.")]
    NoWinner,

    #[msg("Oracle feed account does not match the lottery's feed.")]
    FeedMismatch,

    #[msg("Unable to parse the oracle feed account.")]
    FeedParseError,

    #[msg("Oracle feed has no value yet.")]
    FeedNoValue,

    #[msg("Oracle feed value does not fit in an unsigned 64-bit integer.")]
    FeedValueOutOfRange,

    // Funds
    #[msg("Source account does not have enough lamports.")]
    InsufficientLamports,

    #[msg("Arithmetic overflow.")]
    ArithmeticOverflow,
}
