//! Closed table of every step kind the document dialect knows about.
//!
//! Each row declares the textual key, the family, the shorthand rule applied when
//! the step body is a bare scalar, the fields a valid step must carry, and the
//! child slots the reader/writer walk. `define_step_kinds!` expands the table
//! into exhaustive `match` expressions.

use std::fmt;

/// Broad grouping of step kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Roots that can stand at the top of a document.
    Entity,
    /// The consumer that starts a route.
    Source,
    /// Regular processing steps.
    Processor,
    /// Branch holders that only live inside a parent step (`when`, `doCatch`, ...).
    Clause,
    /// The `expression` wrapper holding exactly one language.
    Expression,
    /// Expression languages (`simple`, `jq`, ...).
    Language,
    DataFormat,
    LoadBalancer,
    ErrorHandler,
    /// Nested configuration objects (`redeliveryPolicy`, `param`, ...).
    Configuration,
    RestVerb,
    Security,
}

impl Family {
    /// Whether members of this family carry a step name and may be written wrapped.
    pub fn has_step_name(self) -> bool {
        !matches!(self, Family::DataFormat | Family::LoadBalancer)
    }
}

/// Expansion applied when a step body is a scalar instead of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    None,
    /// `to: "log:foo"` becomes `to: {uri: "log:foo"}`.
    Field(&'static str),
    /// `marshal: json` becomes `marshal: {json: {}}`.
    DataFormatName,
}

/// How a field of a step holds nested elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSpec {
    /// At most one element of the given kind, written unwrapped under the field key.
    Single { field: &'static str, kind: StepKind },
    /// Sequential flow: a list of `{kind: body}` wrappers.
    Branch { field: &'static str },
    /// A list of bare bodies that all share one kind.
    List { field: &'static str, kind: StepKind },
    /// Independent members written as `{kind: body}` wrappers.
    WrappedList { field: &'static str },
    /// An `expression` wrapper; inline language keys fold into the `expression` field.
    Expression { field: &'static str },
    /// At most one key out of a family, written under the member's own kind name.
    OneOf { family: Family },
}

impl ChildSpec {
    pub const fn single(field: &'static str, kind: StepKind) -> Self {
        ChildSpec::Single { field, kind }
    }

    pub const fn branch(field: &'static str) -> Self {
        ChildSpec::Branch { field }
    }

    pub const fn list(field: &'static str, kind: StepKind) -> Self {
        ChildSpec::List { field, kind }
    }

    pub const fn wrapped(field: &'static str) -> Self {
        ChildSpec::WrappedList { field }
    }

    pub const fn expression(field: &'static str) -> Self {
        ChildSpec::Expression { field }
    }

    pub const fn one_of(family: Family) -> Self {
        ChildSpec::OneOf { family }
    }

    /// The document key this child lives under, if it is fixed.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ChildSpec::Single { field, .. }
            | ChildSpec::Branch { field }
            | ChildSpec::List { field, .. }
            | ChildSpec::WrappedList { field }
            | ChildSpec::Expression { field } => Some(field),
            ChildSpec::OneOf { .. } => None,
        }
    }
}

const NO: Shorthand = Shorthand::None;
const URI: Shorthand = Shorthand::Field("uri");
const MESSAGE: Shorthand = Shorthand::Field("message");
const NAME: Shorthand = Shorthand::Field("name");
const PATTERN: Shorthand = Shorthand::Field("pattern");
const TYPE: Shorthand = Shorthand::Field("type");
const EXPRESSION: Shorthand = Shorthand::Field("expression");
const REF: Shorthand = Shorthand::Field("ref");
const DATA_FORMAT: Shorthand = Shorthand::DataFormatName;

const STEPS: ChildSpec = ChildSpec::branch("steps");
const EXPR: ChildSpec = ChildSpec::expression("expression");
const ON_WHEN: ChildSpec = ChildSpec::single("onWhen", StepKind::OnWhen);
const REDELIVERY: ChildSpec = ChildSpec::single("redeliveryPolicy", StepKind::RedeliveryPolicy);
const REST_PARAMS: ChildSpec = ChildSpec::list("param", StepKind::Param);
const REST_RESPONSES: ChildSpec = ChildSpec::list("responseMessage", StepKind::ResponseMessage);

macro_rules! define_step_kinds {
    (
        $(
            $variant:ident => $name:literal, $family:ident, $shorthand:expr,
                [$($req:literal),* $(,)?], [$($child:expr),* $(,)?];
        )*
    ) => {
        /// Discriminant of every known step variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StepKind {
            $( $variant, )*
        }

        impl StepKind {
            pub const ALL: &'static [StepKind] = &[ $( StepKind::$variant, )* ];

            /// Textual key used in the document.
            pub fn name(self) -> &'static str {
                match self {
                    $( StepKind::$variant => $name, )*
                }
            }

            pub fn from_name(name: &str) -> Option<StepKind> {
                match name {
                    $( $name => Some(StepKind::$variant), )*
                    _ => None,
                }
            }

            pub fn family(self) -> Family {
                match self {
                    $( StepKind::$variant => Family::$family, )*
                }
            }

            pub fn shorthand(self) -> Shorthand {
                match self {
                    $( StepKind::$variant => $shorthand, )*
                }
            }

            /// Fields a well-formed step of this kind must set.
            pub fn required_fields(self) -> &'static [&'static str] {
                match self {
                    $( StepKind::$variant => &[$($req),*], )*
                }
            }

            /// Child slots read and written by the document transform.
            pub fn children(self) -> &'static [ChildSpec] {
                match self {
                    $(
                        StepKind::$variant => {
                            const CHILDREN: &[ChildSpec] = &[$($child),*];
                            CHILDREN
                        }
                    )*
                }
            }
        }
    };
}

define_step_kinds! {
    // Entity roots
    Route => "route", Entity, NO, [], [ChildSpec::single("from", StepKind::From)];
    RouteConfiguration => "routeConfiguration", Entity, NO, [], [
        ChildSpec::single("errorHandler", StepKind::ErrorHandler),
        ChildSpec::wrapped("intercept"),
        ChildSpec::wrapped("interceptFrom"),
        ChildSpec::wrapped("interceptSendToEndpoint"),
        ChildSpec::wrapped("onException"),
        ChildSpec::wrapped("onCompletion"),
    ];
    Rest => "rest", Entity, NO, [], [
        ChildSpec::single("securityDefinitions", StepKind::SecurityDefinitions),
        ChildSpec::list("get", StepKind::Get),
        ChildSpec::list("post", StepKind::Post),
        ChildSpec::list("put", StepKind::Put),
        ChildSpec::list("patch", StepKind::Patch),
        ChildSpec::list("delete", StepKind::Delete),
        ChildSpec::list("head", StepKind::Head),
    ];
    OnException => "onException", Entity, NO, ["exception"], [
        ON_WHEN,
        ChildSpec::expression("retryWhile"),
        ChildSpec::expression("handled"),
        ChildSpec::expression("continued"),
        REDELIVERY,
        STEPS,
    ];
    OnCompletion => "onCompletion", Entity, NO, [], [ON_WHEN, STEPS];
    Intercept => "intercept", Entity, NO, [], [ON_WHEN, STEPS];
    InterceptFrom => "interceptFrom", Entity, URI, [], [ON_WHEN, STEPS];
    InterceptSendToEndpoint => "interceptSendToEndpoint", Entity, URI, ["uri"], [ON_WHEN, STEPS];

    // Source
    From => "from", Source, URI, ["uri"], [STEPS];

    // Clauses
    When => "when", Clause, NO, [], [EXPR, STEPS];
    Otherwise => "otherwise", Clause, NO, [], [STEPS];
    DoCatch => "doCatch", Clause, NO, ["exception"], [ON_WHEN, STEPS];
    DoFinally => "doFinally", Clause, NO, [], [STEPS];
    OnFallback => "onFallback", Clause, NO, [], [STEPS];

    // Processors holding nested flow
    Aggregate => "aggregate", Processor, NO, ["aggregationStrategy"], [
        ChildSpec::expression("correlationExpression"),
        ChildSpec::expression("completionPredicate"),
        ChildSpec::expression("completionTimeoutExpression"),
        ChildSpec::expression("completionSizeExpression"),
        STEPS,
    ];
    Choice => "choice", Processor, NO, [], [
        ChildSpec::list("when", StepKind::When),
        ChildSpec::single("otherwise", StepKind::Otherwise),
    ];
    CircuitBreaker => "circuitBreaker", Processor, NO, [], [
        ChildSpec::single("resilience4jConfiguration", StepKind::Resilience4jConfiguration),
        ChildSpec::single("faultToleranceConfiguration", StepKind::FaultToleranceConfiguration),
        STEPS,
        ChildSpec::single("onFallback", StepKind::OnFallback),
    ];
    DoTry => "doTry", Processor, NO, [], [
        STEPS,
        ChildSpec::list("doCatch", StepKind::DoCatch),
        ChildSpec::single("doFinally", StepKind::DoFinally),
    ];
    Filter => "filter", Processor, NO, [], [EXPR, STEPS];
    IdempotentConsumer => "idempotentConsumer", Processor, NO, ["idempotentRepository"], [EXPR, STEPS];
    LoadBalance => "loadBalance", Processor, NO, [], [ChildSpec::one_of(Family::LoadBalancer), STEPS];
    Loop => "loop", Processor, NO, [], [EXPR, STEPS];
    Multicast => "multicast", Processor, NO, [], [STEPS];
    Pipeline => "pipeline", Processor, NO, [], [STEPS];
    Policy => "policy", Processor, NO, ["ref"], [STEPS];
    Resequence => "resequence", Processor, NO, [], [EXPR, STEPS];
    Saga => "saga", Processor, NO, [], [STEPS];
    Split => "split", Processor, NO, [], [EXPR, STEPS];
    Step => "step", Processor, NO, [], [STEPS];
    Transacted => "transacted", Processor, NO, [], [STEPS];

    // Leaf processors
    Bean => "bean", Processor, NO, [], [];
    ClaimCheck => "claimCheck", Processor, NO, [], [];
    ConvertBodyTo => "convertBodyTo", Processor, TYPE, ["type"], [];
    ConvertHeaderTo => "convertHeaderTo", Processor, NO, ["name", "type"], [];
    ConvertVariableTo => "convertVariableTo", Processor, NO, ["name", "type"], [];
    Delay => "delay", Processor, NO, [], [EXPR];
    DynamicRouter => "dynamicRouter", Processor, NO, [], [EXPR];
    Enrich => "enrich", Processor, NO, [], [EXPR];
    Kamelet => "kamelet", Processor, NAME, ["name"], [];
    Log => "log", Processor, MESSAGE, ["message"], [];
    Marshal => "marshal", Processor, DATA_FORMAT, [], [ChildSpec::one_of(Family::DataFormat)];
    Pausable => "pausable", Processor, NO, ["consumerListener", "untilCheck"], [];
    Poll => "poll", Processor, URI, ["uri"], [];
    PollEnrich => "pollEnrich", Processor, NO, [], [EXPR];
    Process => "process", Processor, NO, ["ref"], [];
    RecipientList => "recipientList", Processor, NO, [], [EXPR];
    RemoveHeader => "removeHeader", Processor, NAME, ["name"], [];
    RemoveHeaders => "removeHeaders", Processor, PATTERN, ["pattern"], [];
    RemoveProperties => "removeProperties", Processor, PATTERN, ["pattern"], [];
    RemoveProperty => "removeProperty", Processor, NAME, ["name"], [];
    RemoveVariable => "removeVariable", Processor, NAME, ["name"], [];
    Resumable => "resumable", Processor, NO, ["resumeStrategy"], [];
    Rollback => "rollback", Processor, MESSAGE, [], [];
    RoutingSlip => "routingSlip", Processor, NO, [], [EXPR];
    Sample => "sample", Processor, NO, [], [];
    Script => "script", Processor, NO, [], [EXPR];
    SetBody => "setBody", Processor, NO, [], [EXPR];
    SetExchangePattern => "setExchangePattern", Processor, PATTERN, ["pattern"], [];
    SetHeader => "setHeader", Processor, NO, ["name"], [EXPR];
    SetHeaders => "setHeaders", Processor, NO, [], [ChildSpec::list("headers", StepKind::SetHeader)];
    SetProperty => "setProperty", Processor, NO, ["name"], [EXPR];
    SetVariable => "setVariable", Processor, NO, ["name"], [EXPR];
    SetVariables => "setVariables", Processor, NO, [], [ChildSpec::list("variables", StepKind::SetVariable)];
    Sort => "sort", Processor, NO, [], [EXPR];
    Stop => "stop", Processor, NO, [], [];
    Threads => "threads", Processor, NO, [], [];
    Throttle => "throttle", Processor, NO, [], [EXPR, ChildSpec::expression("correlationExpression")];
    ThrowException => "throwException", Processor, MESSAGE, [], [];
    To => "to", Processor, URI, ["uri"], [];
    ToD => "toD", Processor, URI, ["uri"], [];
    Tokenizer => "tokenizer", Processor, NO, [], [];
    Transform => "transform", Processor, NO, [], [EXPR];
    Unmarshal => "unmarshal", Processor, DATA_FORMAT, [], [ChildSpec::one_of(Family::DataFormat)];
    Validate => "validate", Processor, NO, [], [EXPR];
    WireTap => "wireTap", Processor, URI, ["uri"], [];

    // Expressions
    Expression => "expression", Expression, NO, [], [ChildSpec::one_of(Family::Language)];
    OnWhen => "onWhen", Configuration, NO, [], [EXPR];
    Constant => "constant", Language, EXPRESSION, ["expression"], [];
    Csimple => "csimple", Language, EXPRESSION, ["expression"], [];
    Datasonnet => "datasonnet", Language, EXPRESSION, ["expression"], [];
    ExchangeProperty => "exchangeProperty", Language, EXPRESSION, ["expression"], [];
    Groovy => "groovy", Language, EXPRESSION, ["expression"], [];
    Header => "header", Language, EXPRESSION, ["expression"], [];
    Hl7terser => "hl7terser", Language, EXPRESSION, ["expression"], [];
    Java => "java", Language, EXPRESSION, ["expression"], [];
    Joor => "joor", Language, EXPRESSION, ["expression"], [];
    Jq => "jq", Language, EXPRESSION, ["expression"], [];
    Js => "js", Language, EXPRESSION, ["expression"], [];
    Jsonpath => "jsonpath", Language, EXPRESSION, ["expression"], [];
    Language => "language", Language, EXPRESSION, ["language", "expression"], [];
    Method => "method", Language, NO, [], [];
    Mvel => "mvel", Language, EXPRESSION, ["expression"], [];
    Ognl => "ognl", Language, EXPRESSION, ["expression"], [];
    Python => "python", Language, EXPRESSION, ["expression"], [];
    Ref => "ref", Language, EXPRESSION, ["expression"], [];
    Simple => "simple", Language, EXPRESSION, ["expression"], [];
    Spel => "spel", Language, EXPRESSION, ["expression"], [];
    Tokenize => "tokenize", Language, Shorthand::Field("token"), ["token"], [];
    Variable => "variable", Language, EXPRESSION, ["expression"], [];
    Wasm => "wasm", Language, EXPRESSION, ["expression", "module"], [];
    Xpath => "xpath", Language, EXPRESSION, ["expression"], [];
    Xquery => "xquery", Language, EXPRESSION, ["expression"], [];
    Xtokenize => "xtokenize", Language, EXPRESSION, ["expression"], [];

    // Data formats
    Asn1 => "asn1", DataFormat, NO, [], [];
    Avro => "avro", DataFormat, NO, [], [];
    Barcode => "barcode", DataFormat, NO, [], [];
    Base64 => "base64", DataFormat, NO, [], [];
    Beanio => "beanio", DataFormat, NO, ["mapping", "streamName"], [];
    Bindy => "bindy", DataFormat, NO, ["type"], [];
    Cbor => "cbor", DataFormat, NO, [], [];
    Crypto => "crypto", DataFormat, NO, [], [];
    Csv => "csv", DataFormat, NO, [], [];
    Custom => "custom", DataFormat, REF, ["ref"], [];
    FhirJson => "fhirJson", DataFormat, NO, [], [];
    FhirXml => "fhirXml", DataFormat, NO, [], [];
    Flatpack => "flatpack", DataFormat, NO, [], [];
    Grok => "grok", DataFormat, NO, ["pattern"], [];
    GzipDeflater => "gzipDeflater", DataFormat, NO, [], [];
    Hl7 => "hl7", DataFormat, NO, [], [];
    Ical => "ical", DataFormat, NO, [], [];
    Iso8583 => "iso8583", DataFormat, NO, [], [];
    JacksonXml => "jacksonXml", DataFormat, NO, [], [];
    Jaxb => "jaxb", DataFormat, NO, ["contextPath"], [];
    Json => "json", DataFormat, NO, [], [];
    JsonApi => "jsonApi", DataFormat, NO, [], [];
    Lzf => "lzf", DataFormat, NO, [], [];
    MimeMultipart => "mimeMultipart", DataFormat, NO, [], [];
    ParquetAvro => "parquetAvro", DataFormat, NO, [], [];
    Pgp => "pgp", DataFormat, NO, [], [];
    Protobuf => "protobuf", DataFormat, NO, [], [];
    Rss => "rss", DataFormat, NO, [], [];
    Smooks => "smooks", DataFormat, NO, ["smooksConfig"], [];
    Soap => "soap", DataFormat, NO, ["contextPath"], [];
    SwiftMt => "swiftMt", DataFormat, NO, [], [];
    SwiftMx => "swiftMx", DataFormat, NO, [], [];
    Syslog => "syslog", DataFormat, NO, [], [];
    TarFile => "tarFile", DataFormat, NO, [], [];
    Thrift => "thrift", DataFormat, NO, [], [];
    TidyMarkup => "tidyMarkup", DataFormat, NO, [], [];
    UnivocityCsv => "univocityCsv", DataFormat, NO, [], [];
    UnivocityFixed => "univocityFixed", DataFormat, NO, [], [];
    UnivocityTsv => "univocityTsv", DataFormat, NO, [], [];
    XmlSecurity => "xmlSecurity", DataFormat, NO, [], [];
    Yaml => "yaml", DataFormat, NO, [], [];
    ZipDeflater => "zipDeflater", DataFormat, NO, [], [];
    ZipFile => "zipFile", DataFormat, NO, [], [];

    // Load balancer strategies
    CustomLoadBalancer => "customLoadBalancer", LoadBalancer, REF, ["ref"], [];
    FailoverLoadBalancer => "failoverLoadBalancer", LoadBalancer, NO, [], [];
    RandomLoadBalancer => "randomLoadBalancer", LoadBalancer, NO, [], [];
    RoundRobinLoadBalancer => "roundRobinLoadBalancer", LoadBalancer, NO, [], [];
    StickyLoadBalancer => "stickyLoadBalancer", LoadBalancer, NO, [], [
        ChildSpec::expression("correlationExpression"),
    ];
    TopicLoadBalancer => "topicLoadBalancer", LoadBalancer, NO, [], [];
    WeightedLoadBalancer => "weightedLoadBalancer", LoadBalancer, NO, ["distributionRatio"], [];

    // Error handlers
    ErrorHandler => "errorHandler", Configuration, NO, [], [ChildSpec::one_of(Family::ErrorHandler)];
    DeadLetterChannel => "deadLetterChannel", ErrorHandler, NO, ["deadLetterUri"], [REDELIVERY];
    DefaultErrorHandler => "defaultErrorHandler", ErrorHandler, NO, [], [REDELIVERY];
    JtaTransactionErrorHandler => "jtaTransactionErrorHandler", ErrorHandler, NO, [], [REDELIVERY];
    NoErrorHandler => "noErrorHandler", ErrorHandler, NO, [], [];
    RefErrorHandler => "refErrorHandler", ErrorHandler, REF, ["ref"], [];
    SpringTransactionErrorHandler => "springTransactionErrorHandler", ErrorHandler, NO, [], [REDELIVERY];

    // Nested configuration
    RedeliveryPolicy => "redeliveryPolicy", Configuration, NO, [], [];
    Resilience4jConfiguration => "resilience4jConfiguration", Configuration, NO, [], [];
    FaultToleranceConfiguration => "faultToleranceConfiguration", Configuration, NO, [], [];
    SecurityDefinitions => "securityDefinitions", Configuration, NO, [], [
        ChildSpec::single("apiKey", StepKind::ApiKey),
        ChildSpec::single("basicAuth", StepKind::BasicAuth),
        ChildSpec::single("bearer", StepKind::Bearer),
        ChildSpec::single("mutualTls", StepKind::MutualTls),
        ChildSpec::single("oauth2", StepKind::Oauth2),
        ChildSpec::single("openIdConnect", StepKind::OpenIdConnect),
    ];
    Param => "param", Configuration, NO, ["name"], [];
    ResponseMessage => "responseMessage", Configuration, NO, ["code"], [];

    // Security schemes
    ApiKey => "apiKey", Security, NO, ["key", "name"], [];
    BasicAuth => "basicAuth", Security, NO, ["key"], [];
    Bearer => "bearer", Security, NO, ["key"], [];
    MutualTls => "mutualTls", Security, NO, ["key"], [];
    Oauth2 => "oauth2", Security, NO, ["key"], [];
    OpenIdConnect => "openIdConnect", Security, NO, ["key", "url"], [];

    // REST verbs
    Get => "get", RestVerb, NO, [], [REST_PARAMS, REST_RESPONSES];
    Post => "post", RestVerb, NO, [], [REST_PARAMS, REST_RESPONSES];
    Put => "put", RestVerb, NO, [], [REST_PARAMS, REST_RESPONSES];
    Patch => "patch", RestVerb, NO, [], [REST_PARAMS, REST_RESPONSES];
    Delete => "delete", RestVerb, NO, [], [REST_PARAMS, REST_RESPONSES];
    Head => "head", RestVerb, NO, [], [REST_PARAMS, REST_RESPONSES];
}

impl StepKind {
    pub fn is_language(self) -> bool {
        self.family() == Family::Language
    }

    /// Child spec registered for a fixed document key.
    pub fn child(self, field: &str) -> Option<&'static ChildSpec> {
        self.children()
            .iter()
            .find(|spec| spec.field() == Some(field))
    }

    /// The one-of family this kind selects from, if any.
    pub fn selector(self) -> Option<Family> {
        self.children().iter().find_map(|spec| match spec {
            ChildSpec::OneOf { family } => Some(*family),
            _ => None,
        })
    }

    /// Whether inline language keys on this kind fold into its `expression` field.
    pub fn folds_inline_language(self) -> bool {
        self.child("expression")
            .is_some_and(|spec| matches!(spec, ChildSpec::Expression { .. }))
    }

    /// Kinds whose `uri` names an external component.
    pub fn carries_endpoint(self) -> bool {
        matches!(
            self,
            StepKind::From
                | StepKind::To
                | StepKind::ToD
                | StepKind::Poll
                | StepKind::WireTap
                | StepKind::InterceptFrom
                | StepKind::InterceptSendToEndpoint
        )
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
