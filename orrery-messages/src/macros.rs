/// Render a message template with named values.
///
/// ```
/// use orrery_messages::{msg, messages::MESSAGES};
///
/// let line = msg!(MESSAGES.provision.ready, name = "freeglut");
/// assert_eq!(line, "freeglut is ready");
/// ```
#[macro_export]
macro_rules! msg {
    ($template:expr) => {
        $crate::builder::MessageBuilder::new($template).build()
    };
    ($template:expr, $($key:ident = $value:expr),+ $(,)?) => {
        {
            let mut builder = $crate::builder::MessageBuilder::new($template);
            $(
                builder = builder.var(stringify!($key), $value);
            )+
            builder.build()
        }
    };
}
