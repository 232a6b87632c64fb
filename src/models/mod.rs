//! Public data models sent to and returned by the API.

mod analysis;
mod devices;
mod messages;
mod previews;
mod servers;
mod usage;

pub use analysis::{
    AnalysisOutcome, BlockListResult, ContentSummary, DeliverabilityReport, DnsRecords,
    EmailAuthenticationResult, SpamAnalysisResult, SpamAssassinResult, SpamAssassinRule,
    SpamFilterResults,
};
pub use devices::{Device, DeviceCreateOptions, DeviceListResult, OtpResult};
pub(crate) use devices::OtpSharedOptions;
pub use messages::{
    AttachmentOptions, Message, MessageAddress, MessageAttachment, MessageCode, MessageContent,
    MessageCreateOptions, MessageForwardOptions, MessageHeader, MessageImage, MessageLink,
    MessageListResult, MessageMetadata, MessageReplyOptions, MessageSummary, SearchCriteria,
    SearchMatchOperator,
};
pub use previews::{
    EmailClient, EmailClientListResult, Preview, PreviewListResult, PreviewRequestOptions,
};
pub use servers::{Server, ServerCreateOptions, ServerListResult};
pub use usage::{UsageAccountLimit, UsageAccountLimits, UsageTransaction, UsageTransactionListResult};
