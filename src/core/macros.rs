//! Macros for ergonomic event declaration.

/// Generate an event enum, its parallel kind enum and the
/// [`Event`](crate::core::Event) impl.
///
/// The kind enum gets one unit variant per event variant and serves as the
/// event's type tag for kind-keyed matching.
///
/// # Example
///
/// ```
/// use machinist::event_enum;
/// use machinist::core::Event;
///
/// event_enum! {
///     pub enum OrderEvent {
///         Submit(String),
///         Cancel,
///     }
///     kind: OrderEventKind
/// }
///
/// let a = OrderEvent::Submit("a".into());
/// let b = OrderEvent::Submit("b".into());
/// assert_ne!(a, b);
/// assert_eq!(a.kind(), b.kind());
/// assert_eq!(a.kind(), OrderEventKind::Submit);
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( ( $($field:ty),* $(,)? ) )?
            ),* $(,)?
        }

        kind: $kind:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $( ( $($field),* ) )?
            ),*
        }

        /// Kind tags for the event enum generated alongside it.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $kind {
            $($variant),*
        }

        impl $crate::core::Event for $name {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                match self {
                    $(Self::$variant { .. } => $kind::$variant),*
                }
            }
        }
    };
}
