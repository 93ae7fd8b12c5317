/// Create an enum of focusable stops that can be cycled with tab/shift-tab.
/// Stops are visited in declaration order and wrap around at either end.
#[macro_export]
macro_rules! focus_ring {
    ($(#[$meta:meta])* $name:ident { $($(#[$variant_meta:meta])* $variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),*
        }

        impl $name {
            /// Every stop, in tab order
            const STOPS: &'static [$name] = &[
                $($name::$variant),*
            ];

            /// Where this stop sits in the tab order
            fn index(self) -> usize {
                self as usize
            }

            /// Rotate through the stops (e.g. with tab)
            pub fn next(self) -> Self {
                Self::STOPS[(self.index() + 1) % Self::STOPS.len()]
            }

            /// Rotate through the stops in reverse (e.g. with shift-tab)
            pub fn prev(self) -> Self {
                Self::STOPS[(self.index() + Self::STOPS.len() - 1) % Self::STOPS.len()]
            }
        }
    };
}
