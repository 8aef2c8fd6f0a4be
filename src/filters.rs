use std::io::{self, BufRead, Write};

/// City whose trip log can be explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Case-insensitive match against the city names, ignoring surrounding
    /// whitespace. Returns None for anything outside the fixed set.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "chicago" => Some(City::Chicago),
            "new york city" => Some(City::NewYorkCity),
            "washington" => Some(City::Washington),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Backing CSV file name for this city.
    pub fn data_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

/// Month narrowing. The datasets cover January through June only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    January,
    February,
    March,
    April,
    May,
    June,
    All,
}

impl MonthFilter {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "january" => Some(MonthFilter::January),
            "february" => Some(MonthFilter::February),
            "march" => Some(MonthFilter::March),
            "april" => Some(MonthFilter::April),
            "may" => Some(MonthFilter::May),
            "june" => Some(MonthFilter::June),
            "all" => Some(MonthFilter::All),
            _ => None,
        }
    }

    /// 1-based calendar month number, or None when no filter applies.
    pub fn number(&self) -> Option<i32> {
        match self {
            MonthFilter::January => Some(1),
            MonthFilter::February => Some(2),
            MonthFilter::March => Some(3),
            MonthFilter::April => Some(4),
            MonthFilter::May => Some(5),
            MonthFilter::June => Some(6),
            MonthFilter::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MonthFilter::January => "January",
            MonthFilter::February => "February",
            MonthFilter::March => "March",
            MonthFilter::April => "April",
            MonthFilter::May => "May",
            MonthFilter::June => "June",
            MonthFilter::All => "all",
        }
    }
}

/// Day-of-week narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    All,
}

impl DayFilter {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "monday" => Some(DayFilter::Monday),
            "tuesday" => Some(DayFilter::Tuesday),
            "wednesday" => Some(DayFilter::Wednesday),
            "thursday" => Some(DayFilter::Thursday),
            "friday" => Some(DayFilter::Friday),
            "saturday" => Some(DayFilter::Saturday),
            "sunday" => Some(DayFilter::Sunday),
            "all" => Some(DayFilter::All),
            _ => None,
        }
    }

    /// Title-case weekday name as produced by the `%A` datetime format,
    /// or None when no filter applies.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            DayFilter::Monday => Some("Monday"),
            DayFilter::Tuesday => Some("Tuesday"),
            DayFilter::Wednesday => Some("Wednesday"),
            DayFilter::Thursday => Some("Thursday"),
            DayFilter::Friday => Some("Friday"),
            DayFilter::Saturday => Some("Saturday"),
            DayFilter::Sunday => Some("Sunday"),
            DayFilter::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.title().unwrap_or("all")
    }
}

/// Validated (city, month, day) triple returned by the filter collector.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

// ── Interactive collection ──────────────────────────────────────────────────

/// Ask for city, month and day in turn, re-prompting each field until the
/// answer parses. Only an exhausted reader ends a prompt early.
pub fn collect_filters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Selection> {
    let city = prompt_until(
        input,
        output,
        "Which city would you like to explore? (Chicago, New York City, Washington): ",
        "That city is not in the dataset. Please enter Chicago, New York City or Washington.",
        City::parse,
    )?;

    let month = prompt_until(
        input,
        output,
        "Filter by month? Enter a month from January to June, or 'all': ",
        "That month is not available. Please enter January through June, or 'all'.",
        MonthFilter::parse,
    )?;

    let day = prompt_until(
        input,
        output,
        "Filter by day of week? Enter a day name, or 'all': ",
        "That is not a day of the week. Please enter a day name, or 'all'.",
        DayFilter::parse,
    )?;

    Ok(Selection { city, month, day })
}

/// Yes/no prompt with the same retry behavior as the field prompts.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<bool> {
    prompt_until(input, output, prompt, "Please answer yes or no.", |line| {
        match line.trim().to_lowercase().as_str() {
            "yes" => Some(true),
            "no" => Some(false),
            _ => None,
        }
    })
}

/// Prompt on `output`, read one line from `input`, and retry with a message
/// until `parse` accepts the answer.
fn prompt_until<R: BufRead, W: Write, T>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    retry: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> io::Result<T> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        let line = read_line(input)?;
        match parse(&line) {
            Some(value) => return Ok(value),
            None => writeln!(output, "{retry}")?,
        }
    }
}

/// Read one line, surfacing end-of-input as an error so the prompt loops
/// cannot spin on a closed reader.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    if n == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed while waiting for an answer",
        ));
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn city_parse_is_case_insensitive() {
        assert_eq!(City::parse("chicago"), Some(City::Chicago));
        assert_eq!(City::parse("  New York City "), Some(City::NewYorkCity));
        assert_eq!(City::parse("WASHINGTON"), Some(City::Washington));
        assert_eq!(City::parse("boston"), None);
        assert_eq!(City::parse(""), None);
    }

    #[test]
    fn every_city_round_trips_and_has_its_own_file() {
        let mut files = Vec::new();
        for city in City::ALL {
            assert_eq!(City::parse(city.label()), Some(city));
            files.push(city.data_file());
        }
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), City::ALL.len());
    }

    #[test]
    fn month_parse_covers_first_half_of_year_only() {
        assert_eq!(MonthFilter::parse("June"), Some(MonthFilter::June));
        assert_eq!(MonthFilter::parse("ALL"), Some(MonthFilter::All));
        assert_eq!(MonthFilter::parse("july"), None);
        assert_eq!(MonthFilter::June.number(), Some(6));
        assert_eq!(MonthFilter::All.number(), None);
    }

    #[test]
    fn day_parse_and_title() {
        assert_eq!(DayFilter::parse("monday"), Some(DayFilter::Monday));
        assert_eq!(DayFilter::parse(" Sunday\n"), Some(DayFilter::Sunday));
        assert_eq!(DayFilter::parse("someday"), None);
        assert_eq!(DayFilter::Monday.title(), Some("Monday"));
        assert_eq!(DayFilter::All.title(), None);
    }

    #[test]
    fn invalid_city_reprompts_once_then_accepts() {
        let mut input = Cursor::new(b"Chcago\nChicago\nall\nall\n".to_vec());
        let mut output = Vec::new();

        let selection = collect_filters(&mut input, &mut output).unwrap();
        assert_eq!(selection.city, City::Chicago);
        assert_eq!(selection.month, MonthFilter::All);
        assert_eq!(selection.day, DayFilter::All);

        let text = String::from_utf8(output).unwrap();
        let city_prompts = text.matches("Which city").count();
        assert_eq!(city_prompts, 2);
        assert!(text.contains("not in the dataset"));
    }

    #[test]
    fn collect_filters_returns_full_selection() {
        let mut input = Cursor::new(b"new york city\nMarch\nfriday\n".to_vec());
        let mut output = Vec::new();

        let selection = collect_filters(&mut input, &mut output).unwrap();
        assert_eq!(selection.city, City::NewYorkCity);
        assert_eq!(selection.month, MonthFilter::March);
        assert_eq!(selection.day, DayFilter::Friday);
    }

    #[test]
    fn yes_no_retries_invalid_answers() {
        let mut input = Cursor::new(b"maybe\nYES\n".to_vec());
        let mut output = Vec::new();

        let answer = prompt_yes_no(&mut input, &mut output, "More? ").unwrap();
        assert!(answer);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Please answer yes or no."));
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let mut input = Cursor::new(b"".to_vec());
        let mut output = Vec::new();

        let err = collect_filters(&mut input, &mut output).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
